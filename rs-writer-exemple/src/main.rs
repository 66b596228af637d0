use rs_writer_core::model::frequency_model::FrequencyModel;
use rs_writer_core::model::tokenizer::tokenize;
use rs_writer_core::store::word_store::WordStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Show the store's lifecycle logs by default; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    // The word database lives next to the binary
    // Delete the file to forget everything learned so far
    let store = WordStore::new("./words.db");

    // Repopulate the model from previous sessions
    // A failed load is reported and the model simply starts empty
    let mut model = FrequencyModel::new();
    match store.load_all() {
        Ok(records) => {
            println!("Restored {} words from previous sessions", records.len());
            model.restore(records);
        }
        Err(error) => println!("Starting empty: {error}"),
    }

    // Tokenization is exposed on its own, should the host need it
    println!("Tokens: {:?}", tokenize("The quick, brown Fox!"));

    // Learn from some typed text
    // A real host would call this whenever typed text settles
    model.add_text("the quick brown fox jumps over the lazy dog");
    model.add_text("the quick brown fox naps under the old tree");

    // Mirror the merged rows to durable storage, one transaction each
    // The model keeps working even if a write fails, so just report it
    for (word, row) in model.rows() {
        if let Err(error) = store.merge_word(word, row) {
            println!("Could not persist '{word}': {error}");
        }
    }

    // Predict the next word a few times; "fox" follows "brown" every
    // time here, while "the" fans out between its observed successors
    for _ in 0..5 {
        println!("the quick brown -> {}", model.complete("the quick brown"));
        println!("over the        -> {}", model.complete("over the"));
    }

    // An unknown word never fails, it just predicts nothing
    println!("zebra -> {:?}", model.sample("zebra"));

    Ok(())
}
