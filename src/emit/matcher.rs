// Total-match methods on the base type. Dispatch is an ordered chain of
// runtime type tests in variant declaration order; the first hit wins.

use super::writer::CodeWriter;
use super::qualified;
use crate::model::Schema;

#[derive(Clone, Copy)]
enum Flavor {
    Value,
    Void,
}

pub(super) fn emit_value_match(w: &mut CodeWriter, schema: &Schema) {
    emit_match(w, schema, Flavor::Value);
}

pub(super) fn emit_void_match(w: &mut CodeWriter, schema: &Schema) {
    emit_match(w, schema, Flavor::Void);
}

fn emit_match(w: &mut CodeWriter, schema: &Schema, flavor: Flavor) {
    let optional = if schema.allow_nulls() { " = null" } else { "" };
    let params = schema
        .variants()
        .iter()
        .map(|v| {
            let ty = qualified(schema, v);
            match flavor {
                Flavor::Value => format!("Func<{ty}, R> {}{optional}", v.name()),
                Flavor::Void => format!("Action<{ty}> {}{optional}", v.name()),
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    match flavor {
        Flavor::Value => w.open(format!("public R Match<R>({params})")),
        Flavor::Void => w.open(format!("public void Match({params})")),
    };

    for (index, variant) in schema.variants().iter().enumerate() {
        let ty = qualified(schema, variant);
        let handler = variant.name();
        let keyword = if index == 0 { "if" } else { "else if" };
        w.open(format!("{keyword} (this is {ty})"));
        match flavor {
            Flavor::Value => w.line(format!(
                "return {handler} != null ? {handler}(({ty})this) : default(R);"
            )),
            Flavor::Void => w.line(format!("if ({handler} != null) {handler}(({ty})this);")),
        };
        w.close();
    }

    if let Flavor::Value = flavor {
        w.line("return default(R);");
    }
    w.close();
}
