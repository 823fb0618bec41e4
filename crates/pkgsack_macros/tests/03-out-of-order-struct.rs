use pkgsack_macros::sorted;

#[sorted]
struct SubjectHint {
    name: String,
    arch: Option<String>,
    epoch: Option<u32>,
}

fn main() {}
