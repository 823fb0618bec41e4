use pkgsack_macros::sorted;

#[sorted]
enum Disposition {
    Upgrade,
    Downgrade,
    Install,
}

fn main() {}
