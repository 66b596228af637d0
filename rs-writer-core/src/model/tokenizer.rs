/// Characters removed from the input before splitting into words.
const PUNCTUATION: &str = "~`!@#$%^&*()+={}[];:'\"<>.,/\\?-_";

/// Splits raw text into a sequence of normalized word tokens.
///
/// Normalization, in order:
/// - lowercase the full input
/// - trim leading/trailing whitespace
/// - remove every character in the fixed punctuation set
/// - split on single spaces
///
/// # Notes
/// - An empty input yields a sequence containing a single empty token;
///   consecutive spaces also yield empty tokens. Callers must handle
///   empty tokens rather than assume every entry is a word.
/// - Deterministic and pure; there is no failure mode.
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	let stripped: String = lowered
		.trim()
		.chars()
		.filter(|c| !PUNCTUATION.contains(*c))
		.collect();

	stripped.split(' ').map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tokenize_lowercases_and_strips_punctuation() {
		let tokens = tokenize("The quick, brown Fox!");
		assert_eq!(tokens, vec!["the", "quick", "brown", "fox"]);
	}

	#[test]
	fn test_tokenize_output_is_clean() {
		let tokens = tokenize("Hello... World?! (it's-me) <again> #1");
		for token in &tokens {
			assert_eq!(token.to_lowercase(), *token);
			assert!(!token.chars().any(|c| PUNCTUATION.contains(c)), "dirty token: {token:?}");
		}
	}

	#[test]
	fn test_tokenize_empty_input_yields_single_empty_token() {
		assert_eq!(tokenize(""), vec![""]);
	}

	#[test]
	fn test_tokenize_trims_surrounding_whitespace() {
		assert_eq!(tokenize("  hello world "), vec!["hello", "world"]);
	}

	#[test]
	fn test_tokenize_punctuation_joins_fragments() {
		// Punctuation is removed, not replaced by a separator
		assert_eq!(tokenize("well-known"), vec!["wellknown"]);
		assert_eq!(tokenize("a.b"), vec!["ab"]);
	}

	#[test]
	fn test_tokenize_consecutive_spaces_yield_empty_tokens() {
		assert_eq!(tokenize("a  b"), vec!["a", "", "b"]);
	}
}
