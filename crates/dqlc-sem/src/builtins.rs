/// The fixed built-in function table: two int arguments, int result,
/// looked up case-insensitively.
const BUILTIN_FUNCTIONS: &[&str] = &["MAX", "MIN"];

pub fn lookup(name: &str) -> Option<&'static str> {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("max"), Some("MAX"));
        assert_eq!(lookup("Min"), Some("MIN"));
        assert_eq!(lookup("avg"), None);
    }
}
