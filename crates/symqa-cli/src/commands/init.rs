//! The `symqa init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("symqa.toml").exists() {
        println!("symqa.toml already exists, skipping.");
    } else {
        std::fs::write("symqa.toml", SAMPLE_CONFIG)?;
        println!("Created symqa.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [parser] classpath and grammar at the Stanford parser and CINTIL grammar");
    println!("  2. Run: symqa answer --passage \"...\" --question \"...\"");
    println!("  3. Run: symqa eval --dataset faquad-dev.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# symqa configuration

# Persisted parse cache (passage -> extracted sentences).
cache_path = "data/preprocess_context.json"
# Max concurrent questions during `symqa eval`.
parallelism = 4
# Equal overlap: "last_wins" keeps the later sentence, "first_wins" the earlier.
tie_break = "last_wins"
output_dir = "./symqa-results"

[parser]
program = "java"
max_heap = "500m"
classpath = "${SYMQA_HOME}/stanford-parser-2010-11-30/stanford-parser.jar"
grammar = "${SYMQA_HOME}/cintil.ser/cintil.ser"
timeout_secs = 120

# Any other parser can be used instead: it receives the path of a file with
# one sentence per line as its last argument and must print one bracketed
# tree per line.
# args = ["-c", "my-parser --oneline \"$0\""]
"#;
