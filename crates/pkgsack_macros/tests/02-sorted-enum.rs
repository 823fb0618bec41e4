use pkgsack_macros::sorted;

#[sorted]
enum Disposition {
    Downgrade,
    Install,
    Obsolete,
    Remove,
    Upgrade,
}

fn main() {}
