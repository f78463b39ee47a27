use std::{env, fmt::Write as _, fs, path::PathBuf};

#[path = "src/compare.rs"]
#[allow(dead_code)]
mod compare;
#[path = "src/dataset.rs"]
mod dataset;

const SOURCE: &str = "data/attributes.in";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/compare.rs");
    println!("cargo:rerun-if-changed=src/dataset.rs");
    println!("cargo:rerun-if-changed={SOURCE}");

    let source = fs::read_to_string(SOURCE).map_err(|e| format!("failed to read {SOURCE}: {e}"))?;
    let entries = dataset::parse_attributes(SOURCE, &source)?;

    let mut out = String::new();
    writeln!(out, "// @generated by build.rs from {SOURCE}; do not edit.")?;
    writeln!(out, "static BUILTIN_ENTRIES: [AttributeEntry; {}] = [", entries.len())?;
    for (code, name) in &entries {
        writeln!(out, "    AttributeEntry::from_static({code:#010x}, {name:?}),")?;
    }
    writeln!(out, "];")?;

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR not set")?);
    fs::write(out_dir.join("attrinfo.rs"), out)?;
    Ok(())
}
