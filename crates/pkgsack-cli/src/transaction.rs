//! Renders a solved [`pkgsack_solve::Transaction`] to stdout, one line per
//! entry, the way `rattler-bin`'s `create` command prints its plan before
//! executing it.

use pkgsack::Sack;
use pkgsack_solve::{Transaction, TransactionOperation};

fn render(sack: &Sack, id: pkgsack_pool::SolvableId) -> String {
    sack.package_id(id).unwrap_or_else(|| "<unknown>".to_string())
}

pub fn print_transaction(sack: &Sack, transaction: &Transaction) {
    if transaction.is_empty() {
        println!("nothing to do");
        return;
    }
    for (op, reason) in transaction.entries() {
        match *op {
            TransactionOperation::Install(id) => {
                println!("install   {} ({reason:?})", render(sack, id));
            }
            TransactionOperation::Change { old, new } => {
                println!("upgrade   {} -> {} ({reason:?})", render(sack, old), render(sack, new));
            }
            TransactionOperation::Reinstall(id) => {
                println!("reinstall {} ({reason:?})", render(sack, id));
            }
            TransactionOperation::Remove(id) => {
                println!("remove    {} ({reason:?})", render(sack, id));
            }
        }
    }
}
