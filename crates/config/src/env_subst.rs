/// Replace `${ENV_VAR}` placeholders in config text.
///
/// Unresolvable variables are left as-is so a missing env var surfaces as
/// an obviously-wrong literal value rather than an empty string.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            _ => {
                // Malformed or empty placeholder, emit literally.
                out.push_str("${");
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| (name == "TOKEN").then(|| "hunter2".to_string());
        assert_eq!(
            substitute_with(r#"token = "${TOKEN}""#, lookup),
            r#"token = "hunter2""#
        );
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_with("${FORGECORD_NONEXISTENT}", |_| None),
            "${FORGECORD_NONEXISTENT}"
        );
    }

    #[test]
    fn multiple_placeholders() {
        let lookup = |name: &str| Some(name.to_lowercase());
        assert_eq!(substitute_with("${A}-${B}", lookup), "a-b");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(substitute_with("oops ${TOKEN", |_| None), "oops ${TOKEN");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
