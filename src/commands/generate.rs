use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::header::{self, DefineStyle};
use crate::model::ExtractionManifest;
use crate::toc::{self, Extraction};
use crate::util::{now_utc_string, read_text, sha256_hex, write_json_pretty};

pub fn run(args: Cli) -> Result<()> {
    let input = args.input.as_deref().context("missing input HTML path")?;
    let html = read_text(input)?;

    let extraction = toc::extract_links(&html, &args.marker);
    report(input, &args.marker, &extraction);

    let style = define_style(&args);

    if args.dry_run {
        info!(
            link_count = extraction.links.len(),
            output = %args.output.display(),
            "dry-run complete"
        );
        return Ok(());
    }

    header::write(&args.output, &extraction.links, &style)?;
    info!(
        path = %args.output.display(),
        link_count = extraction.links.len(),
        "wrote header"
    );

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = ExtractionManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            input_path: input.display().to_string(),
            input_sha256: sha256_hex(html.as_bytes()),
            marker: args.marker.clone(),
            marker_found: extraction.marker_found,
            output_path: args.output.display().to_string(),
            link_count: extraction.links.len(),
            links: extraction.links,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote extraction manifest");
    }

    Ok(())
}

fn define_style(args: &Cli) -> DefineStyle {
    if args.raw_names {
        DefineStyle::raw()
    } else {
        DefineStyle::constant(args.suffix.as_str())
    }
}

fn report(input: &Path, marker: &str, extraction: &Extraction) {
    if !extraction.marker_found {
        warn!(
            input = %input.display(),
            marker = %marker,
            "start marker not found; header will be empty"
        );
    } else if extraction.links.is_empty() {
        warn!(input = %input.display(), "no table-of-contents links resolved");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "webdefines-{label}-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cli_for(input: PathBuf, output: PathBuf) -> Cli {
        Cli {
            input: Some(input),
            output,
            marker: crate::cli::DEFAULT_MARKER.to_string(),
            suffix: crate::cli::DEFAULT_SUFFIX.to_string(),
            raw_names: false,
            manifest_path: None,
            dry_run: false,
        }
    }

    const TOC: &str = r#"<html><body>
<div class="nav"><a href="index.html">Home: Start</a></div>
<h1>FEBio User Manual</h1>
<ul>
  <li><a href="ch3.html">Chapter 3: Free Format Input</a>
    <ul>
      <li><a href="ch3.html#s1">3.1: Control</a></li>
      <li><a href="mat.html#iso">3.2: Isotropic Elastic</a></li>
    </ul>
  </li>
</ul>
</body></html>"#;

    #[test]
    fn run_writes_header_and_manifest() {
        let dir = scratch_dir("run");
        let input = dir.join("toc.html");
        let output = dir.join("include").join("WebDefines.h");
        let manifest = dir.join("manifest.json");
        fs::write(&input, TOC).unwrap();

        let mut args = cli_for(input, output.clone());
        args.manifest_path = Some(manifest.clone());
        run(args).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "#pragma once\n\n\
             #define CONTROL_HTML \"ch3.html\"\n\
             #define ISOTROPIC_ELASTIC_HTML \"mat.html\"\n"
        );

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(raw["link_count"], 2);
        assert_eq!(raw["marker_found"], true);
        assert_eq!(raw["links"][0]["name"], "Free_Format_Input_Control");
        assert_eq!(raw["output_path"], output.display().to_string());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_is_byte_identical_across_repeats() {
        let dir = scratch_dir("repeat");
        let input = dir.join("toc.html");
        fs::write(&input, TOC).unwrap();

        let first = dir.join("first.h");
        let second = dir.join("second.h");
        run(cli_for(input.clone(), first.clone())).unwrap();
        run(cli_for(input, second.clone())).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_without_marker_writes_guard_only() {
        let dir = scratch_dir("nomarker");
        let input = dir.join("toc.html");
        let output = dir.join("WebDefines.h");
        fs::write(
            &input,
            r#"<ul><li><a href="a.html">A: One</a><ul><li><a href="b.html">B: Two</a></li></ul></li></ul>"#,
        )
        .unwrap();

        run(cli_for(input, output.clone())).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "#pragma once\n\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_fails_with_context_on_missing_input() {
        let dir = scratch_dir("missing");
        let err = run(cli_for(dir.join("absent.html"), dir.join("out.h"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = scratch_dir("dry");
        let input = dir.join("toc.html");
        let output = dir.join("WebDefines.h");
        let manifest = dir.join("manifest.json");
        fs::write(&input, TOC).unwrap();

        let mut args = cli_for(input, output.clone());
        args.manifest_path = Some(manifest.clone());
        args.dry_run = true;
        run(args).unwrap();

        assert!(!output.exists());
        assert!(!manifest.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
