/// Title-case a personal name: the first letter of every whitespace- or
/// hyphen-separated word upper-cased, the rest lower-cased.
///
/// Applied on write and to name filters on read, so "jOHN" finds "John".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() || ch == '-' {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn capitalises_words() {
        assert_eq!(title_case("john"), "John");
        assert_eq!(title_case("JOHN DOE"), "John Doe");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
        assert_eq!(title_case("élodie"), "Élodie");
    }

    #[test]
    fn keeps_empty_and_spacing() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("  ann "), "  Ann ");
    }
}
