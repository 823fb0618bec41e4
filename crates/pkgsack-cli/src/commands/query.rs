use anyhow::Result;
use pkgsack::Sack;
use pkgsack_query::{CmpType, Keyname, Query};

/// Search the sack by name glob, printing each match's NEVRA and
/// package-id.
#[derive(Debug, clap::Parser)]
pub struct Opt {
    /// Name glob to match, e.g. `python*`.
    name: String,

    /// Keep only each name's highest-EVR match.
    #[clap(long)]
    latest: bool,

    /// Search the full universe instead of the considered set.
    #[clap(long)]
    ignore_excludes: bool,
}

pub fn query(sack: &Sack, opt: Opt) -> Result<()> {
    let cmp = if opt.name.contains(['*', '?', '[']) {
        CmpType::GLOB
    } else {
        CmpType::EQ
    };
    let mut query = Query::new(sack).ignore_excludes(opt.ignore_excludes);
    query.filter_str(Keyname::Name, cmp, opt.name)?;
    query.set_latest(opt.latest);
    let matches = query.apply()?;

    for id in matches.iter() {
        if let Some(package_id) = sack.package_id(id) {
            println!("{package_id}");
        }
    }
    Ok(())
}
