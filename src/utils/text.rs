/// Title-case a value for display: first letter of each whitespace-separated
/// word uppercased, the rest lowercased. Used for names and place fields.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_uppercase_input() {
        assert_eq!(title_case("EDMONTON CANADA"), "Edmonton Canada");
    }

    #[test]
    fn test_title_case_collapses_whitespace() {
        assert_eq!(title_case("  hussein   AMRANI "), "Hussein Amrani");
    }
}
