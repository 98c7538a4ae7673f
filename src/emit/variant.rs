use super::writer::CodeWriter;
use super::{default_literal, field_decl};
use crate::model::{Field, Schema, Variant};

/// Sealed nested class for one variant: own fields, then a constructor
/// taking base, own and default fields in that order.
pub(super) fn emit_variant(w: &mut CodeWriter, schema: &Schema, variant: &Variant) {
    let name = variant.name();
    w.line("[DataContract]");
    w.open(format!("public sealed partial class {name} : {}", schema.name()));

    if !variant.fields().is_empty() {
        for field in variant.fields() {
            w.line(field_decl(field));
        }
        w.blank();
    }

    let params = constructor_params(schema, variant).join(", ");
    w.open(format!("public {name}({params})"));
    for field in assigned_fields(schema, variant) {
        w.line(format!("this.{0} = {0};", field.name()));
    }
    w.close();

    w.close();
}

fn assigned_fields<'a>(schema: &'a Schema, variant: &'a Variant) -> impl Iterator<Item = &'a Field> {
    schema
        .base_fields()
        .iter()
        .chain(variant.fields())
        .chain(schema.default_fields())
}

fn constructor_params(schema: &Schema, variant: &Variant) -> Vec<String> {
    let required = schema
        .base_fields()
        .iter()
        .chain(variant.fields())
        .map(|f| format!("{} {}", f.ty(), f.name()));
    let defaulted = schema
        .default_fields()
        .iter()
        .map(|f| format!("{} {} = {}", f.ty(), f.name(), default_literal(f.ty())));
    required.chain(defaulted).collect()
}
