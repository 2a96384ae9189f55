//! Converts numeric-tone pinyin to the diacritic form.

/// Diacritic forms for tones 1-4, indexed by `tone - 1`.
fn tone_marks(vowel: char) -> Option<[char; 4]> {
    let marks = match vowel {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        _ => return None,
    };
    Some(marks)
}

/// Formats every space-separated token of `text` with [`format_syllable`].
///
/// Tokens are rejoined with single spaces. This is also applied to whole
/// definition strings, formatting any numeric-tone pinyin embedded in them;
/// tokens without a tone digit pass through unchanged.
pub fn format_pinyin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, token) in text.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format_syllable(token));
    }
    out
}

/// Formats a single numeric-tone syllable, e.g. `ni3` to `nǐ`.
///
/// A token is tonal only when it ends in a digit 1-5. Tones 1-4 place a
/// diacritic on the tone-bearing vowel; tone 5 is neutral and only has the
/// digit stripped. All other tokens are returned unchanged, so years and
/// numbers embedded in definitions survive formatting. A tonal token without
/// a recognized vowel has the digit stripped only.
pub fn format_syllable(syllable: &str) -> String {
    let mut chars = syllable.chars().collect::<Vec<_>>();
    let Some(tone) = chars.last().and_then(|c| c.to_digit(10)) else {
        return syllable.to_string();
    };
    if !(1..=5).contains(&tone) {
        return syllable.to_string();
    }

    chars.pop();
    if tone <= 4 {
        if let Some(vowel_idx) = tone_vowel_index(&chars) {
            if let Some(marks) = tone_marks(chars[vowel_idx]) {
                chars[vowel_idx] = marks[tone as usize - 1];
            }
        }
    }
    chars.into_iter().collect()
}

// the tone mark goes on 'a' if present, else 'e', else the final of i/o/u/ü
fn tone_vowel_index(chars: &[char]) -> Option<usize> {
    chars
        .iter()
        .position(|c| *c == 'a')
        .or_else(|| chars.iter().position(|c| *c == 'e'))
        .or_else(|| chars.iter().rposition(|c| matches!(*c, 'i' | 'o' | 'u' | 'ü')))
}
