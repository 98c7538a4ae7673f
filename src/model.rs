// Schema model produced by the parser and consumed by the emitter.
// Built only through the crate-private builders below; read-only afterwards.

/// One `(type, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    ty: String,
    name: String,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: name.into() }
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    name: String,
    line: usize,             // source line of the opener, for diagnostics
    fields: Vec<Field>,      // declared order
}

impl Variant {
    pub(crate) fn new(name: impl Into<String>, line: usize) -> Self {
        Self { name: name.into(), line, fields: Vec::new() }
    }
    pub(crate) fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn line(&self) -> usize {
        self.line
    }
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    allow_nulls: bool,
    known_types: bool,
    base_fields: Vec<Field>,
    default_fields: Vec<Field>,   // kept apart from `base_fields`; emitted after them
    fixed_lines: Vec<String>,     // spliced verbatim into the base type
    variants: Vec<Variant>,       // generation order == dispatch order
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn allow_nulls(&self) -> bool {
        self.allow_nulls
    }
    pub fn known_types(&self) -> bool {
        self.known_types
    }
    pub fn base_fields(&self) -> &[Field] {
        &self.base_fields
    }
    pub fn default_fields(&self) -> &[Field] {
        &self.default_fields
    }
    pub fn fixed_lines(&self) -> &[String] {
        &self.fixed_lines
    }
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Base fields followed by default fields, the order they are declared
    /// on the generated base type.
    pub fn inherited_fields(&self) -> impl Iterator<Item = &Field> {
        self.base_fields.iter().chain(self.default_fields.iter())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILDERS
// ————————————————————————————————————————————————————————————————————————————

/// Flags collected at the top level before the schema block opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub allow_nulls: bool,
    pub known_types: bool,
}

#[derive(Debug)]
pub(crate) struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>, flags: Flags) -> Self {
        Self {
            schema: Schema {
                name: name.into(),
                allow_nulls: flags.allow_nulls,
                known_types: flags.known_types,
                base_fields: Vec::new(),
                default_fields: Vec::new(),
                fixed_lines: Vec::new(),
                variants: Vec::new(),
            },
        }
    }
    pub fn push_base_field(&mut self, field: Field) {
        self.schema.base_fields.push(field);
    }
    pub fn push_default_field(&mut self, field: Field) {
        self.schema.default_fields.push(field);
    }
    pub fn push_fixed_line(&mut self, line: impl Into<String>) {
        self.schema.fixed_lines.push(line.into());
    }
    pub fn push_variant(&mut self, variant: Variant) {
        self.schema.variants.push(variant);
    }
    pub fn finish(self) -> Schema {
        self.schema
    }
}
