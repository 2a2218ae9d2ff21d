//! Built-in Tera filters available to every template.

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};
use tera::{Result, Tera, Value};

/// Register the built-in filters on a freshly built engine.
pub(crate) fn register(tera: &mut Tera) {
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
    tera.register_filter("title_case", title_case);
}

fn str_arg<'a>(value: &'a Value, filter: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("the {filter} filter only applies to strings")))
}

fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(str_arg(value, "snake_case")?.to_snake_case()))
}

fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(
        str_arg(value, "pascal_case")?.to_pascal_case(),
    ))
}

fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(
        str_arg(value, "camel_case")?.to_lower_camel_case(),
    ))
}

fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(str_arg(value, "kebab_case")?.to_kebab_case()))
}

fn title_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(str_arg(value, "title_case")?.to_title_case()))
}
