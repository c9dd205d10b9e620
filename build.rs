// XOR key for obfuscation (16 bytes)
const XOR_KEY: [u8; 16] = [
    0x47, 0x65, 0x6f, 0x45, 0x78, 0x70, 0x6c, 0x6f, 0x72, 0x65, 0x72, 0x4d, 0x61, 0x70, 0x73,
    0x21,
];

/// Embeds the API key from `source_var` (if set at build time) as an
/// obfuscated hex string under `target_var`.
fn embed_key(source_var: &str, target_var: &str) {
    let hex_encoded = match std::env::var(source_var) {
        Ok(api_key) if !api_key.is_empty() => {
            let obfuscated: Vec<u8> = api_key
                .bytes()
                .enumerate()
                .map(|(i, b)| b ^ XOR_KEY[i % XOR_KEY.len()])
                .collect();
            obfuscated.iter().map(|b| format!("{:02x}", b)).collect()
        }
        _ => String::new(),
    };

    println!("cargo:rustc-env={}={}", target_var, hex_encoded);
    println!("cargo:rerun-if-env-changed={}", source_var);
}

fn main() {
    embed_key("GEMINI_API_KEY", "OBFUSCATED_GEMINI_KEY");
    embed_key("GOOGLE_MAPS_API_KEY", "OBFUSCATED_MAPS_KEY");

    #[cfg(feature = "desktop")]
    tauri_build::build()
}
