use super::{load_structures, open_output};
use crate::cli::PartnersArgs;
use crate::config::build_config;
use crate::error::Result;
use std::io::Write;
use threedi::core::models::chain::Chain;
use threedi::core::models::residue::Residue;
use threedi::engine::partners::Partner;
use threedi::workflows::encode::PartnerIndexEncoder;
use tracing::info;

const HEADER: &str = "structure\tchain\tposition\tresidue\tpartner\tpartner_residue";

pub fn run(args: PartnersArgs) -> Result<()> {
    let config = build_config(&args.encoder, None, None, None)?;
    let encoder = PartnerIndexEncoder::with_config(config.encoder);
    let structures = load_structures(&args.input, args.chain)?;

    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "{}", HEADER)?;
    for structure in &structures {
        for chain in &structure.chains {
            let partners = encoder.encode_chain(chain)?;
            write_partner_rows(&mut out, &structure.id, chain, &partners)?;
        }
        info!("Wrote partner table for '{}'.", structure.id);
    }
    out.flush()?;
    Ok(())
}

fn residue_label(residue: &Residue) -> String {
    match residue.insertion_code {
        Some(code) => format!("{}{}{}", residue.name, residue.number, code),
        None => format!("{}{}", residue.name, residue.number),
    }
}

/// One row per residue; `partner` is the sentinel-encoded partner position.
fn write_partner_rows(
    out: &mut dyn Write,
    structure_id: &str,
    chain: &Chain,
    partners: &[usize],
) -> Result<()> {
    for (position, (residue, &partner)) in chain.residues().iter().zip(partners).enumerate() {
        let partner_residue = Partner::from_sentinel(partner)
            .index()
            .and_then(|j| chain.residues().get(j))
            .map_or_else(|| "-".to_string(), residue_label);
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            structure_id,
            chain.id,
            position,
            residue_label(residue),
            partner,
            partner_residue
        )?;
    }
    Ok(())
}
