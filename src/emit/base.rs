use super::writer::CodeWriter;
use super::{field_decl, matcher, qualified, variant, EmitOptions};
use crate::model::Schema;

/// The abstract base class. Variants and match methods are nested inside it
/// so the private constructor keeps the hierarchy closed.
pub(super) fn emit_base(w: &mut CodeWriter, schema: &Schema, options: &EmitOptions) {
    let name = schema.name();

    if schema.known_types() {
        for v in schema.variants() {
            w.line(format!("[KnownType(typeof({}))]", qualified(schema, v)));
        }
    }
    w.line("[DataContract]");
    w.open(format!("public abstract partial class {name}"));

    w.line(format!("private {name}() {{ }}"));
    w.blank();
    w.open("public override string ToString()");
    w.line(format!("return {}(this);", options.printer));
    w.close();

    let mut inherited = schema.inherited_fields().peekable();
    if inherited.peek().is_some() {
        w.blank();
        for field in inherited {
            w.line(field_decl(field));
        }
    }

    if !schema.fixed_lines().is_empty() {
        w.blank();
        w.line("#region Fixed lines");
        for raw in schema.fixed_lines() {
            w.line(raw);
        }
        w.line("#endregion");
    }

    for v in schema.variants() {
        w.blank();
        variant::emit_variant(w, schema, v);
    }

    w.blank();
    matcher::emit_value_match(w, schema);
    w.blank();
    matcher::emit_void_match(w, schema);

    w.close();
}
