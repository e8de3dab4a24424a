// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Flavor text from the API carries hard line breaks, form feeds and soft
/// hyphens from the original game text boxes.
pub fn clean_flavor_text(s: &str) -> String {
    let flat: String = s
        .chars()
        .filter(|&c| c != '\u{ad}')
        .map(|c| if c == '\u{c}' { ' ' } else { c })
        .collect();
    normalize_ws(&flat)
}

/// Parse a lowercase or uppercase roman numeral (i..=mmmcmxcix).
pub fn roman_to_int(s: &str) -> Option<u32> {
    fn value(c: char) -> Option<u32> {
        Some(match c.to_ascii_lowercase() {
            'i' => 1, 'v' => 5, 'x' => 10, 'l' => 50,
            'c' => 100, 'd' => 500, 'm' => 1000,
            _ => return None,
        })
    }
    if s.is_empty() { return None; }
    let vals = s.chars().map(value).collect::<Option<Vec<_>>>()?;
    let mut total = 0i64;
    for (i, &v) in vals.iter().enumerate() {
        match vals.get(i + 1) {
            Some(&next) if next > v => total -= i64::from(v),
            _ => total += i64::from(v),
        }
    }
    let total = u32::try_from(total).ok()?;
    // Reject non-canonical spellings like "iiii" or "vx".
    if int_to_roman(total)?.eq_ignore_ascii_case(s) { Some(total) } else { None }
}

fn int_to_roman(mut n: u32) -> Option<String> {
    if n == 0 || n >= 4000 { return None; }
    const TABLE: [(u32, &str); 13] = [
        (1000, "m"), (900, "cm"), (500, "d"), (400, "cd"),
        (100, "c"), (90, "xc"), (50, "l"), (40, "xl"),
        (10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i"),
    ];
    let mut out = s!();
    for (v, r) in TABLE {
        while n >= v { out.push_str(r); n -= v; }
    }
    Some(out)
}

/// "generation-iv" -> 4
pub fn generation_number(name: &str) -> Option<u8> {
    let (_, numeral) = name.split_once('-')?;
    roman_to_int(numeral).and_then(|n| u8::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_names_map_to_numbers() {
        assert_eq!(generation_number("generation-i"), Some(1));
        assert_eq!(generation_number("generation-iv"), Some(4));
        assert_eq!(generation_number("generation-ix"), Some(9));
        assert_eq!(generation_number("generation-x"), Some(10));
        assert_eq!(generation_number("generation"), None);
        assert_eq!(generation_number("generation-foo"), None);
    }

    #[test]
    fn roman_rejects_non_canonical() {
        assert_eq!(roman_to_int("xiv"), Some(14));
        assert_eq!(roman_to_int("iiii"), None);
        assert_eq!(roman_to_int(""), None);
    }

    #[test]
    fn flavor_text_is_flattened() {
        let raw = "When several of\nthese POKéMON\u{c}gather, their\nelectricity could\nbuild and cause\nlightning storms.";
        assert_eq!(
            clean_flavor_text(raw),
            "When several of these POKéMON gather, their electricity could build and cause lightning storms."
        );
    }
}
