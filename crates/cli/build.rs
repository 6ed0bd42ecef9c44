use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("roastline")
        .version("1.0.0")
        .author("Roastline Contributors")
        .about("Roast landing-page copy with an AI audit")
        .arg(clap::arg!(<URL> "Landing page URL to audit"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout; required for pdf)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, markdown, json, pdf)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "markdown", "json", "pdf"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds, applied to both network calls").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for the scrape request").value_name("UA"))
        .arg(clap::arg!(--model <NAME> "Gemini model to request the critique from").default_value("gemini-2.0-flash-lite"))
        .arg(clap::arg!(--max_chars <NUM> "Maximum characters of page text sent for analysis").default_value("15000"))
        .arg(clap::arg!(-v --verbose "Enable step-by-step progress output"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "roastline", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "roastline", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "roastline", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "roastline", &completions_dir).unwrap();
}
