use crate::random::RandomSource;

pub const DIGITS: &str = "0123456789";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const SYMBOLS: &str = "!@#$%^&*()_+{}[]|:;<>,.?/~";

/// Separators placed between words in readable passwords.
pub const SEPARATORS: &str = SYMBOLS;

pub const DEFAULT_WORDS: [&str; 20] = [
    "apple", "orange", "banana", "grape", "peach", "plum", "berry", "melon", "kiwi", "mango",
    "cherry", "pear", "lemon", "lime", "apricot", "fig", "date", "coconut", "papaya", "pineapple",
];

/// Which character classes go into the flat charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetSpec {
    pub digits: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub symbols: bool,
}

/// Concatenates the enabled classes: digits, uppercase, lowercase, symbols.
pub fn build_charset(spec: CharsetSpec) -> Vec<char> {
    let mut charset: Vec<char> = Vec::new();

    if spec.digits {
        charset.extend(DIGITS.chars());
    }

    if spec.uppercase {
        charset.extend(UPPERCASE.chars());
    }

    if spec.lowercase {
        charset.extend(LOWERCASE.chars());
    }

    if spec.symbols {
        charset.extend(SYMBOLS.chars());
    }

    charset
}

/// Splits a comma separated word field as typed. An empty field means no
/// custom words at all.
pub fn parse_word_list(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }

    field.split(',').map(String::from).collect()
}

/// # Panics
///
/// Panics if `set` is empty.
pub fn pick_char<R: RandomSource + ?Sized>(rng: &mut R, set: &[char]) -> char {
    set[rng.pick_index(set.len())]
}

pub fn pick_separator<R: RandomSource + ?Sized>(rng: &mut R) -> char {
    // ASCII only, so bytes index characters
    let separators = SEPARATORS.as_bytes();
    separators[rng.pick_index(separators.len())] as char
}

/// Upper-cases each character of `word` on a coin flip.
pub fn mix_case<R: RandomSource + ?Sized>(rng: &mut R, word: &str) -> String {
    let mut mixed = String::with_capacity(word.len());

    for c in word.chars() {
        if rng.coin() {
            mixed.extend(c.to_uppercase());
        } else {
            mixed.push(c);
        }
    }

    mixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedSource;

    const ALL: CharsetSpec = CharsetSpec {
        digits: true,
        uppercase: true,
        lowercase: true,
        symbols: true,
    };

    #[test]
    fn charset_order_is_fixed() {
        let charset: String = build_charset(ALL).into_iter().collect();
        assert_eq!(charset, format!("{DIGITS}{UPPERCASE}{LOWERCASE}{SYMBOLS}"));
    }

    #[test]
    fn charset_skips_disabled_classes() {
        let charset: String = build_charset(CharsetSpec {
            digits: true,
            uppercase: false,
            lowercase: true,
            symbols: false,
        })
        .into_iter()
        .collect();

        assert_eq!(charset, format!("{DIGITS}{LOWERCASE}"));
    }

    #[test]
    fn empty_charset() {
        let charset = build_charset(CharsetSpec {
            digits: false,
            uppercase: false,
            lowercase: false,
            symbols: false,
        });
        assert!(charset.is_empty());
    }

    #[test]
    fn word_list_split_keeps_entries_as_typed() {
        assert_eq!(parse_word_list("red, green,blue"), vec!["red", " green", "blue"]);
        assert_eq!(parse_word_list("a,,b"), vec!["a", "", "b"]);
        assert!(parse_word_list("").is_empty());
    }

    #[test]
    fn mix_case_follows_coin() {
        let mut rng = ScriptedSource::new(vec![0.9, 0.1, 0.6, 0.5]);
        assert_eq!(mix_case(&mut rng, "kiwi"), "KiWi");
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    #[should_panic]
    fn pick_char_from_empty_set_panics() {
        let mut rng = ScriptedSource::constant(0.0);
        pick_char(&mut rng, &[]);
    }

    #[test]
    fn separators_are_ascii() {
        assert!(SEPARATORS.is_ascii());
    }

    #[test]
    fn separator_comes_from_symbol_set() {
        let mut rng = ScriptedSource::constant(0.0);
        assert_eq!(pick_separator(&mut rng), '!');

        let mut rng = ScriptedSource::constant(0.999);
        assert_eq!(pick_separator(&mut rng), '~');
    }
}
