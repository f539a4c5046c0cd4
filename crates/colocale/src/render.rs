//! Source text for translations files in each supported format.

use crate::error::ColocaleError;
use crate::model::{FragmentMessages, MessageNode, MessageTree};
use colocale_toml::TranslationsFormat;
use heck::{ToLowerCamelCase as _, ToUpperCamelCase as _};
use std::fmt::Write as _;

const INDENT: &str = "  ";

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Renders the per-locale messages of one translations file.
pub fn render(
    format: TranslationsFormat,
    per_locale: &FragmentMessages,
) -> Result<String, ColocaleError> {
    match format {
        TranslationsFormat::Json => render_json(per_locale),
        TranslationsFormat::Ts => Ok(render_ts(per_locale)),
        TranslationsFormat::Js => Ok(render_js(per_locale)),
    }
}

/// Pretty JSON with a trailing newline, the same layout used for catalog files.
pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ColocaleError> {
    let mut content = serde_json::to_string_pretty(value).map_err(ColocaleError::Serialize)?;
    content.push('\n');
    Ok(content)
}

fn render_ts(per_locale: &FragmentMessages) -> String {
    let idents: Vec<(&str, String)> = per_locale
        .keys()
        .map(|locale| (locale.as_str(), locale_ident(locale)))
        .collect();
    let first = idents.first().map(|(_, ident)| ident.as_str());

    let mut out = String::new();
    for (index, ((_, ident), tree)) in idents.iter().zip(per_locale.values()).enumerate() {
        match first {
            Some(first) if index > 0 => {
                let _ = write!(out, "const {ident}: typeof {first} = ");
            },
            _ => {
                let _ = write!(out, "const {ident} = ");
            },
        }
        write_object(&mut out, tree, 0);
        out.push_str(";\n\n");
    }

    let exports = idents
        .iter()
        .map(|(locale, ident)| {
            let key = property_key(locale);
            if key == *ident {
                key
            } else {
                format!("{key}: {ident}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    match first {
        Some(first) => {
            let _ = writeln!(
                out,
                "export default {{ {exports} }} satisfies TLocales<typeof {first}>;"
            );
        },
        None => out.push_str("export default {};\n"),
    }
    out
}

fn render_js(per_locale: &FragmentMessages) -> String {
    let locales: MessageTree = per_locale
        .iter()
        .map(|(locale, tree)| (locale.clone(), MessageNode::Group(tree.clone())))
        .collect();

    let mut out = String::from("const locales = ");
    write_object(&mut out, &locales, 0);
    out.push_str(";\n\nexport default locales;\n");
    out
}

fn write_object(out: &mut String, tree: &MessageTree, depth: usize) {
    if tree.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (key, node) in tree {
        out.push_str(&INDENT.repeat(depth + 1));
        out.push_str(&property_key(key));
        out.push_str(": ");
        match node {
            MessageNode::Text(text) => out.push_str(&quote(text)),
            MessageNode::Group(group) => write_object(out, group, depth + 1),
        }
        out.push_str(",\n");
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Object keys stay bare when they are identifiers and are quoted otherwise.
fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// The `const` name used for a locale in TypeScript output.
pub fn locale_ident(locale: &str) -> String {
    let usable = |name: &str| is_identifier(name) && !RESERVED_WORDS.contains(&name);

    if usable(locale) {
        return locale.to_string();
    }
    let camel = locale.to_lower_camel_case();
    if usable(&camel) {
        camel
    } else {
        format!("locale{}", locale.to_upper_camel_case())
    }
}
