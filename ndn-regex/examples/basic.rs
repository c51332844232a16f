use ndn_name::{Name, NameRelation};
use ndn_regex::{HyperRelation, Regex};

fn main() {
    let re = Regex::new("^<ndn><edu><ucla>").unwrap();
    assert!(re.is_match(&Name::from("/ndn/edu/ucla/yingdi")));
    assert!(!re.is_match(&Name::from("/ndn/edu/mit")));

    // Unanchored at the start: `<KEY>` may be anywhere before the last component.
    let re = Regex::new("<KEY><>$").unwrap();
    assert!(re.is_match(&Name::from("/ndn/edu/ucla/KEY/ksk-1")));

    let mut re = Regex::with_expand("^<ndn><(.*)\\.(.*)><DNS>(<>*)<>", r"<ndn>\2\1\3").unwrap();
    let name = Name::from("ndn:/ndn/ucla.edu/DNS/yingdi/mac/ksk-1");
    assert!(re.match_name(&name));
    let expanded = re.expand("").unwrap();
    println!("{name} -> {expanded}");
    assert_eq!(expanded, Name::from("/ndn/edu/ucla/yingdi/mac"));

    let exact = Regex::from_name(&expanded, true).unwrap();
    println!("{exact}");
    assert!(exact.is_match(&expanded));

    let relation = HyperRelation::builder()
        .packet_regex("^(<>*)$")
        .packet_expand(r"\1")
        .key_regex("^(<>*)<KEY><>$")
        .key_expand(r"\1")
        .relation("is-prefix-of")
        .build()
        .unwrap();
    assert_eq!(relation.relation(), NameRelation::IsPrefixOf);
    assert!(relation
        .check(
            &Name::from("/ndn/edu/ucla/yingdi/data"),
            &Name::from("/ndn/edu/ucla/KEY/ksk-1")
        )
        .unwrap());
}
