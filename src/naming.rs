// Copyright 2025 Cowboy AI, LLC.

//! Name transforms used for member ids and display names

/// Lower-case the first character
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a camel-case identifier into words, e.g. `CustomerOrder` into
/// `Customer Order` and `placeOrder` into `Place Order`.
///
/// Runs of capitals stay together (`HTTPServer` becomes `HTTP Server`).
pub fn natural_name(identifier: &str) -> String {
    let chars: Vec<char> = identifier
        .chars()
        .map(|c| if c == '_' || c == '$' { ' ' } else { c })
        .collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with(' ') {
                out.push(' ');
            }
        }
        out.push(c);
    }
    let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize(&collapsed)
}

/// The simple (unqualified) part of a dotted class name
pub fn simple_name(class_name: &str) -> &str {
    class_name.rsplit('.').next().unwrap_or(class_name)
}

/// Member id for an accessor: `getFirstName` and `isActive` become
/// `firstName` and `active`. Returns `None` when no accessor prefix applies.
pub fn accessor_member_id(method_name: &str) -> Option<String> {
    ["get", "is"].iter().find_map(|prefix| {
        method_name
            .strip_prefix(prefix)
            .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
            .map(decapitalize)
    })
}

/// The id a mixin class contributes under: the last token of its simple
/// name after `_` or `$`, decapitalized.
pub fn mixin_member_id(mixin_class_name: &str) -> String {
    let simple = simple_name(mixin_class_name);
    let last = simple
        .rfind(['_', '$'])
        .map(|idx| &simple[idx + 1..])
        .filter(|rest| !rest.is_empty())
        .unwrap_or(simple);
    decapitalize(last)
}
