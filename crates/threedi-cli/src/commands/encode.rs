use super::{load_structures, open_output};
use crate::cli::{EncodeArgs, OutputFormat};
use crate::config::{AppConfig, build_config, resolve_codebook_path};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use threedi::core::codebook::Codebook;
use threedi::engine::progress::ProgressReporter;
use threedi::workflows::encode::{ChainSequence, Encoder};
use tracing::info;

const CODEBOOK_HINT: &str =
    "pass a manifest path with --codebook, or install the codebook under `threedi data path`";

pub fn run(args: EncodeArgs) -> Result<()> {
    let config = build_config(
        &args.encoder,
        args.codebook.as_deref(),
        args.unknown_char,
        args.format,
    )?;
    let encoder = build_encoder(&config)?;

    let structures = load_structures(&args.input, args.chain)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut out = open_output(args.output.as_deref())?;
    let mut total_chains = 0;
    for structure in &structures {
        let sequences = encoder.encode_structure_with_progress(structure, &reporter)?;
        total_chains += sequences.len();
        write_sequences(&mut out, &structure.id, &sequences, config.format)?;
    }
    out.flush()?;
    progress_handler.clear();

    info!(
        "Encoded {} chain(s) from {} structure(s).",
        total_chains,
        structures.len()
    );
    if let Some(path) = &args.output {
        eprintln!("✓ Wrote {} sequence(s) to {}", total_chains, path.display());
    }
    Ok(())
}

/// Loads the configured codebook and applies the unknown-character override.
pub(crate) fn build_encoder(config: &AppConfig) -> Result<Encoder> {
    let path = if parser::looks_like_path(&config.codebook) {
        PathBuf::from(&config.codebook)
    } else {
        resolve_codebook_path(&config.codebook, &DataManager::new()?)?
    };
    info!("Loading codebook from {:?}", &path);

    let mut codebook = Codebook::load(&path).map_err(|source| CliError::Codebook {
        path: path.clone(),
        source,
        hint: CODEBOOK_HINT,
    })?;

    if let Some(unknown) = config.unknown_char {
        let alphabet = codebook
            .alphabet()
            .with_unknown(unknown)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        codebook = codebook.with_alphabet(alphabet);
    }

    Ok(Encoder::with_config(Arc::new(codebook), config.encoder.clone()))
}

pub(crate) fn write_sequences(
    out: &mut dyn Write,
    structure_id: &str,
    sequences: &[ChainSequence],
    format: OutputFormat,
) -> Result<()> {
    for record in sequences {
        match format {
            OutputFormat::Fasta => {
                writeln!(out, ">{}_{}", structure_id, record.chain_id)?;
                writeln!(out, "{}", record.sequence)?;
            }
            OutputFormat::Tsv => {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    structure_id,
                    record.chain_id,
                    record.states.len(),
                    record.sequence
                )?;
            }
        }
    }
    Ok(())
}
