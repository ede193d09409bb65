use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed=BERTOK_VOCAB");

    let out_dir = env::var("OUT_DIR").unwrap();
    build_embedded_vocab(&out_dir);
}

/// Embeds the vocabulary named by `BERTOK_VOCAB` (a local JSON file) into the
/// binary. URLs are left for the runtime loader.
fn build_embedded_vocab(out_dir: &str) {
    let out = Path::new(out_dir);
    let mut codegen = String::new();

    let vocab_path = env::var("BERTOK_VOCAB")
        .ok()
        .filter(|v| !v.starts_with("http://") && !v.starts_with("https://"))
        .map(|v| Path::new(&v).to_path_buf())
        .filter(|p| p.is_file());

    match vocab_path {
        Some(path) => {
            println!("cargo:rerun-if-changed={}", path.display());
            let data = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
            let vocab: Vec<String> = serde_json::from_str(&data)
                .unwrap_or_else(|e| panic!("{} is not a JSON array of strings: {e}", path.display()));

            let dest = out.join("vocab.json");
            fs::write(&dest, &data).expect("Failed to write vocab.json");
            codegen.push_str(&format!(
                "pub const VOCAB: Option<&[u8]> = Some(include_bytes!(\"{}\"));\n",
                dest.display()
            ));
            codegen.push_str(&format!("pub const VOCAB_LEN: usize = {};\n", vocab.len()));
        }
        None => {
            codegen.push_str("pub const VOCAB: Option<&[u8]> = None;\n");
            codegen.push_str("pub const VOCAB_LEN: usize = 0;\n");
        }
    }

    let dest = out.join("embedded_vocab.rs");
    fs::write(&dest, &codegen).expect("Failed to write embedded_vocab.rs");
}
