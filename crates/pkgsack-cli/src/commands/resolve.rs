use anyhow::Result;
use pkgsack::Sack;
use pkgsack_query::{CmpType, Selector};
use pkgsack_solve::GoalFlags;

use crate::transaction::print_transaction;

/// Stage an arbitrary mix of jobs and print the resulting transaction.
#[derive(Debug, clap::Parser)]
pub struct Opt {
    /// Names to install.
    #[clap(long = "install")]
    install: Vec<String>,

    /// Names to erase.
    #[clap(long = "erase")]
    erase: Vec<String>,

    /// Also drop dependencies that exist only for an erased name.
    #[clap(long)]
    cleandeps: bool,

    /// Names to upgrade to their newest candidate.
    #[clap(long = "upgrade")]
    upgrade: Vec<String>,

    /// Upgrade every installed package to its newest candidate.
    #[clap(long)]
    upgrade_all: bool,

    /// Like `--upgrade-all`, but also allows vendor/arch changes.
    #[clap(long)]
    distupgrade_all: bool,

    /// Allow dropping non-protected packages to satisfy the jobs.
    #[clap(long)]
    allow_uninstall: bool,

    /// Apply FORCEBEST to every staged job.
    #[clap(long)]
    force_best: bool,

    /// Ignore recommends/supplements edges entirely.
    #[clap(long)]
    ignore_weak_deps: bool,
}

pub fn resolve(sack: &Sack, opt: Opt) -> Result<()> {
    let mut goal = sack.goal();
    goal.set_flags(GoalFlags {
        force_best: opt.force_best,
        allow_uninstall: opt.allow_uninstall,
        ignore_weak_deps: opt.ignore_weak_deps,
    });

    for name in opt.install {
        goal.install(Selector::new().set_name(CmpType::EQ, name)?);
    }
    for name in opt.erase {
        goal.erase(Selector::new().set_name(CmpType::EQ, name)?, opt.cleandeps);
    }
    for name in opt.upgrade {
        goal.upgrade(Selector::new().set_name(CmpType::EQ, name)?);
    }
    if opt.upgrade_all {
        goal.upgrade_all();
    }
    if opt.distupgrade_all {
        goal.distupgrade_all();
    }

    let transaction = goal.run()?;
    print_transaction(sack, transaction);
    Ok(())
}
