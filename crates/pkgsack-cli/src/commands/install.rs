use anyhow::Result;
use pkgsack::Sack;
use pkgsack_query::{CmpType, Selector};

use crate::transaction::print_transaction;

/// Stage and run a single install job for `name`.
#[derive(Debug, clap::Parser)]
pub struct Opt {
    /// Name of the package to install.
    name: String,

    /// Allow dropping other installed packages to satisfy the install.
    #[clap(long)]
    allow_uninstall: bool,
}

pub fn install(sack: &Sack, opt: Opt) -> Result<()> {
    let selector = Selector::new().set_name(CmpType::EQ, opt.name)?;
    let mut goal = sack.goal();
    goal.set_flags(pkgsack_solve::GoalFlags {
        allow_uninstall: opt.allow_uninstall,
        ..Default::default()
    });
    goal.install(selector);
    let transaction = goal.run()?;
    print_transaction(sack, transaction);
    Ok(())
}
