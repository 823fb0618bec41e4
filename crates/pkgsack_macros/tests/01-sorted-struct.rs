use pkgsack_macros::sorted;

#[sorted]
struct SubjectHint {
    arch: Option<String>,
    epoch: Option<u32>,
    name: String,
    release: Option<String>,
    version: Option<String>,
}

fn main() {}
