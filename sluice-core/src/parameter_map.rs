use crate::{Error, LogicalType, PrepareStatement, Result};

/// Resolved type of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    pub logical_type: LogicalType,
    pub nullable: bool,
}

impl ParameterInfo {
    pub const fn new(logical_type: LogicalType, nullable: bool) -> Self {
        Self {
            logical_type,
            nullable,
        }
    }
}

/// Position of every parameter slot inside the runtime buffer.
///
/// Slots are packed in index order at the start of the buffer (the fixed
/// region), text and binary bytes follow them (the variable region). The null
/// indicators live in a separate bitmap of `nulls_size` bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterLayout {
    offsets: Vec<usize>,
    fixed_size: usize,
}

impl ParameterLayout {
    fn new(parameters: &[ParameterInfo]) -> Self {
        let mut fixed_size = 0;
        let offsets = parameters
            .iter()
            .map(|v| {
                let offset = fixed_size;
                fixed_size += v.logical_type.slot_width();
                offset
            })
            .collect();
        Self {
            offsets,
            fixed_size,
        }
    }

    /// Byte offset of the slot of parameter `index`.
    pub fn offset(&self, index: u32) -> usize {
        self.offsets[index as usize]
    }

    /// Size of the fixed region, also the offset where the variable region begins.
    pub fn fixed_size(&self) -> usize {
        self.fixed_size
    }

    /// Size of the null bitmap.
    pub fn nulls_size(&self) -> usize {
        self.offsets.len().div_ceil(8)
    }
}

/// Resolved type and nullability of every parameter of a statement, indexed
/// by the normalized placeholder index.
///
/// Built once after type inference and never modified afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterMap {
    parameters: Vec<ParameterInfo>,
    layout: ParameterLayout,
}

impl ParameterMap {
    pub fn new(parameters: Vec<ParameterInfo>) -> Self {
        let layout = ParameterLayout::new(&parameters);
        Self { parameters, layout }
    }

    /// Build the map from SQL type names, as reported by the type system.
    ///
    /// Fails if any name does not resolve to a supported [`LogicalType`].
    pub fn from_type_names<I, S>(types: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let parameters = types
            .into_iter()
            .enumerate()
            .map(|(index, (name, nullable))| {
                let logical_type = name.as_ref().parse::<LogicalType>().map_err(|e| {
                    let error = e.context(format!("While resolving the type of parameter {index}"));
                    log::error!("{:#}", error);
                    error
                })?;
                Ok(ParameterInfo::new(logical_type, nullable))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(parameters))
    }

    /// Build the map of `statement`, there must be exactly one entry per placeholder.
    pub fn for_statement(
        statement: &PrepareStatement,
        parameters: impl IntoIterator<Item = ParameterInfo>,
    ) -> Result<Self> {
        let parameters = parameters.into_iter().collect::<Vec<_>>();
        if parameters.len() != statement.parameters_count() {
            let error = Error::msg(format!(
                "Statement `{}` has {} placeholders but {} parameter types were resolved",
                statement.name,
                statement.parameters_count(),
                parameters.len()
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self::new(parameters))
    }

    /// Information about parameter `index`.
    ///
    /// # Panics
    /// If `index` is not a parameter of the statement: every index handed out
    /// by the placeholder normalization has an entry, anything else is a bug in
    /// the compilation pipeline.
    pub fn get(&self, index: u32) -> &ParameterInfo {
        match self.parameters.get(index as usize) {
            Some(v) => v,
            None => panic!(
                "Parameter {} is not in the parameter map ({} parameters), placeholder numbering is inconsistent",
                index,
                self.parameters.len()
            ),
        }
    }

    pub fn try_get(&self, index: u32) -> Option<&ParameterInfo> {
        self.parameters.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterInfo> {
        self.parameters.iter()
    }

    pub fn layout(&self) -> &ParameterLayout {
        &self.layout
    }
}

impl FromIterator<ParameterInfo> for ParameterMap {
    fn from_iter<T: IntoIterator<Item = ParameterInfo>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
