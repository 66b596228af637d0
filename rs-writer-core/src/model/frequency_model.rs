use std::collections::HashMap;

use rand::Rng;

use super::tokenizer::tokenize;
use super::transition_row::TransitionRow;

/// First-order Markov frequency model over word tokens.
///
/// The `FrequencyModel` owns the in-memory transition table mapping each
/// observed word to its [`TransitionRow`]. It is the only writer of that
/// table for the lifetime of the process; persistence flows through the
/// word store, which exchanges whole rows with the model via
/// [`FrequencyModel::rows`] and [`FrequencyModel::restore`].
///
/// # Responsibilities
/// - Ingest observed token sequences and accumulate transition counts
/// - Predict a next word for a given last word by weighted sampling
/// - Restore rows persisted by previous sessions (count accumulation)
///
/// # Invariants
/// - Rows are created on first observation and never removed
/// - The empty-token sentinel never gains sampling mass
/// - No operation fails: unknown words sample to the empty string
#[derive(Clone, Debug, Default)]
pub struct FrequencyModel {
	/// Mapping from a word to its outgoing transition counts.
	words: HashMap<String, TransitionRow>,
}

impl FrequencyModel {
	/// Creates a new model with an empty transition table.
	pub fn new() -> Self {
		Self { words: HashMap::new() }
	}

	/// Ingests an ordered token sequence.
	///
	/// Every adjacent pair `(word, next_word)` increments the count for
	/// `next_word` in the row for `word`, creating row and entry as
	/// needed. The final token is paired with the empty-token sentinel,
	/// so a word observed without a successor is still present in the
	/// table (with zero sampling mass).
	pub fn observe(&mut self, tokens: &[String]) {
		for (i, word) in tokens.iter().enumerate() {
			let next_word = tokens.get(i + 1).map(String::as_str).unwrap_or("");
			self.words.entry(word.clone()).or_default().record(next_word);
		}
	}

	/// Tokenizes `text` and ingests the resulting sequence.
	///
	/// This is the call the host makes when typed text settles into a
	/// new observation.
	pub fn add_text(&mut self, text: &str) {
		self.observe(&tokenize(text));
	}

	/// Predicts a next word for `last_word` using the process RNG.
	///
	/// See [`FrequencyModel::sample_with`] for the selection policy.
	pub fn sample(&self, last_word: &str) -> String {
		self.sample_with(last_word, &mut rand::rng())
	}

	/// Predicts a next word for `last_word` with a caller-supplied RNG.
	///
	/// Selection is the weighted random draw of [`TransitionRow::predict`],
	/// proportional-ish to observed counts in insertion order.
	///
	/// # Notes
	/// - A word absent from the table yields the empty string. This is
	///   the defined fallback for the unknown-word case; sampling never
	///   panics and never returns an error.
	/// - A row with no sampling mass (or an exhausted draw) also yields
	///   the empty string, meaning "no prediction".
	pub fn sample_with<R: Rng + ?Sized>(&self, last_word: &str, rng: &mut R) -> String {
		match self.words.get(last_word) {
			Some(row) => row.predict(rng).unwrap_or("").to_owned(),
			None => String::new(),
		}
	}

	/// Predicts the word that should follow `text`, using the process RNG.
	pub fn complete(&self, text: &str) -> String {
		self.complete_with(text, &mut rand::rng())
	}

	/// Predicts the word that should follow `text`.
	///
	/// Tokenizes the input and samples from its last token. This is the
	/// generation request path: the host hands over the text typed so
	/// far and receives the predicted next word (or the empty string).
	pub fn complete_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
		let tokens = tokenize(text);
		let last_word = tokens.last().map(String::as_str).unwrap_or_default();
		self.sample_with(last_word, rng)
	}

	/// Merges a single persisted row into the table.
	///
	/// An existing row absorbs the counts by summation; a new word takes
	/// the row as-is.
	pub fn merge_row(&mut self, word: String, row: TransitionRow) {
		match self.words.get_mut(&word) {
			Some(existing) => existing.merge(&row),
			None => {
				self.words.insert(word, row);
			}
		}
	}

	/// Repopulates the table from the word store's full scan.
	///
	/// Intended for startup: pass the output of `WordStore::load_all`
	/// wholesale. Because the scan either fully succeeds or fails before
	/// any row reaches the model, a load failure leaves the table empty
	/// rather than partially populated.
	pub fn restore(&mut self, records: Vec<(String, TransitionRow)>) {
		for (word, row) in records {
			self.merge_row(word, row);
		}
	}

	/// Returns the transition row for `word`, if the word was ever observed.
	pub fn row(&self, word: &str) -> Option<&TransitionRow> {
		self.words.get(word)
	}

	/// Iterates over all `(word, row)` pairs.
	///
	/// This is how the host obtains the already-merged rows it hands to
	/// `WordStore::merge_word`; supplying whole rows keeps the store free
	/// of read-modify-write cycles.
	pub fn rows(&self) -> impl Iterator<Item = (&str, &TransitionRow)> {
		self.words.iter().map(|(word, row)| (word.as_str(), row))
	}

	/// Number of distinct words in the table.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// True if nothing was ever observed or restored.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}
