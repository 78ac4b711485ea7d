use super::*;
use crate::location::Unit;
use pretty_assertions::assert_eq;

// === Pattern constructors ===

#[test]
fn class_rejects_bad_bounds() {
    assert_eq!(
        Pattern::class(Cat::NUM, 1, Some(0)).unwrap_err().code,
        ErrorCode::BadMax
    );
    assert_eq!(
        Pattern::class(Cat::NUM, 3, Some(2)).unwrap_err().code,
        ErrorCode::BadMin
    );
    assert_eq!(
        Pattern::class(Cat::empty(), 1, None).unwrap_err().code,
        ErrorCode::Cat
    );
    assert!(Pattern::class(Cat::NUM, 2, Some(2)).is_ok());
}

#[test]
fn empty_literal_is_rejected() {
    assert_eq!(Pattern::literal("").unwrap_err().code, ErrorCode::EmptyLiteral);
}

#[test]
fn literal_extent_counts_every_unit() {
    let Pattern::Literal(literal) = Pattern::literal("e\u{0301}=\n").unwrap() else {
        panic!("expected literal");
    };
    assert_eq!(literal.extent().lengths(), [5, 4, 3, 1]);
    assert_eq!(literal.extent()[Unit::Char].after, Some(0));
    assert_eq!(literal.as_bytes(), "e\u{0301}=\n".as_bytes());
}

#[test]
fn bad_regex_is_rejected() {
    let error = Pattern::regex("[a-").unwrap_err();
    assert_eq!(error.code, ErrorCode::BadRegex);
    assert!(error.detail.is_some());
}

#[test]
fn unicode_word_boundary_compiles() {
    assert!(Pattern::regex(r"\bif\b").is_ok());
    assert!(Pattern::regex(r"\w+\b").is_ok());
}

#[test]
fn pattern_display() {
    assert_eq!(
        Pattern::class(Cat::NUM, 1, None).unwrap().to_string(),
        "[NUM]{1,}"
    );
    assert_eq!(
        Pattern::class(Cat::SPACE, 1, Some(3)).unwrap().to_string(),
        "[SPACE]{1,3}"
    );
    assert_eq!(Pattern::literal("==").unwrap().to_string(), "\"==\"");
    assert_eq!(Pattern::regex("[0-9]+").unwrap().to_string(), "/[0-9]+/");
}

// === Registry ===

#[test]
fn ids_follow_registration_order() {
    let mut registry = Registry::new();
    let a = registry.define("a", Pattern::literal("a").unwrap()).unwrap();
    let b = registry.define("b", Pattern::literal("b").unwrap()).unwrap();
    assert_eq!((a.raw(), b.raw()), (0, 1));
    assert_eq!(registry.len(), 2);
    assert_eq!(&*registry.find_by_name("b").unwrap().name, "b");
    assert_eq!(registry.find_by_id(a).unwrap().id, a);
}

#[test]
fn missing_names_and_ids() {
    let registry = Registry::new();
    assert_eq!(
        registry.find_by_name("nope").unwrap_err().code,
        ErrorCode::NotFound
    );
    assert_eq!(
        registry.find_by_id(DefinitionId::new(7)).unwrap_err().code,
        ErrorCode::NotFound
    );
}

#[test]
fn duplicate_names_resolve_to_earliest() {
    let mut registry = Registry::new();
    let first = registry.define("x", Pattern::literal("a").unwrap()).unwrap();
    let second = registry.define("x", Pattern::literal("b").unwrap()).unwrap();
    assert_eq!(registry.find_by_name("x").unwrap().id, first);
    assert_eq!(registry.find_by_id(second).unwrap().pattern.to_string(), "\"b\"");
    assert_eq!(registry.root().len(), 2);
}

#[test]
fn find_by_id_and_name_agree() {
    let mut registry = Registry::new();
    for name in ["a", "b", "c"] {
        registry.define(name, Pattern::literal(name).unwrap()).unwrap();
    }
    for definition in registry.iter() {
        let by_name = registry.find_by_name(&definition.name).unwrap();
        let by_id = registry.find_by_id(definition.id).unwrap();
        assert_eq!(by_name.id, by_id.id);
    }
}

#[test]
fn add_reference_requires_multi() {
    let mut registry = Registry::new();
    let lit = registry.define("lit", Pattern::literal("a").unwrap()).unwrap();
    let error = registry.add_reference(lit, "x", 1, Some(1)).unwrap_err();
    assert_eq!(error.code, ErrorCode::PatternType);
}

#[test]
fn add_reference_checks_bounds() {
    let mut registry = Registry::new();
    let multi = registry.define("m", Pattern::multi(MultiKind::Or)).unwrap();
    assert_eq!(
        registry.add_reference(multi, "x", 0, Some(0)).unwrap_err().code,
        ErrorCode::BadMax
    );
    assert_eq!(
        registry.add_reference(multi, "x", 2, Some(1)).unwrap_err().code,
        ErrorCode::BadMin
    );
}

#[test]
fn resolve_binds_forward_references() {
    let mut registry = Registry::new();
    let multi = registry.define("m", Pattern::multi(MultiKind::Or)).unwrap();
    registry.add_reference(multi, "later", 1, Some(1)).unwrap();
    let later = registry.define("later", Pattern::literal("z").unwrap()).unwrap();

    let reference = &registry.get(multi).unwrap().as_multi().unwrap().references[0];
    assert_eq!(reference.target().unwrap_err().code, ErrorCode::NullPointer);

    registry.resolve().unwrap();
    registry.resolve().unwrap();
    let reference = &registry.get(multi).unwrap().as_multi().unwrap().references[0];
    assert_eq!(reference.definition, Some(later));
}

#[test]
fn resolve_unknown_name_is_not_found() {
    let mut registry = Registry::new();
    let multi = registry.define("m", Pattern::multi(MultiKind::Sequence)).unwrap();
    registry.add_reference(multi, "ghost", 1, Some(1)).unwrap();
    let error = registry.resolve_multi(multi).unwrap_err();
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[test]
fn nested_scope_wins_over_top_level() {
    let mut registry = Registry::new();
    let top = registry.define("digit", Pattern::literal("0").unwrap()).unwrap();
    let outer = registry.define("outer", Pattern::multi(MultiKind::Or)).unwrap();
    let inner = registry
        .define_in(outer, "inner", Pattern::multi(MultiKind::Or))
        .unwrap();
    let local = registry
        .define_in(outer, "digit", Pattern::literal("1").unwrap())
        .unwrap();

    assert_eq!(registry.find_by_name("digit").unwrap().id, top);
    assert_eq!(registry.find_in_scope(Some(outer), "digit").unwrap().id, local);
    // Lookup from the inner multi walks out through `outer`.
    assert_eq!(registry.find_in_scope(Some(inner), "digit").unwrap().id, local);
    assert_eq!(registry.find_in_scope(None, "digit").unwrap().id, top);

    assert_eq!(registry.get(local).unwrap().owner, Some(outer));
    assert_eq!(
        registry.get(inner).unwrap().as_multi().unwrap().parent,
        Some(outer)
    );
    assert!(registry.root().get("inner").is_none());
}

#[test]
fn define_in_requires_multi_parent() {
    let mut registry = Registry::new();
    let lit = registry.define("lit", Pattern::literal("a").unwrap()).unwrap();
    let error = registry
        .define_in(lit, "x", Pattern::literal("x").unwrap())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::PatternType);
}

#[test]
fn multi_display_lists_references() {
    let mut registry = Registry::new();
    let or = registry.define("or", Pattern::multi(MultiKind::Or)).unwrap();
    registry.add_reference(or, "a", 1, Some(1)).unwrap();
    registry.add_reference(or, "b", 1, Some(1)).unwrap();
    let seq = registry.define("seq", Pattern::multi(MultiKind::Sequence)).unwrap();
    registry.add_reference(seq, "a", 1, Some(1)).unwrap();
    registry.add_reference(seq, "b", 1, Some(1)).unwrap();

    assert_eq!(registry.get(or).unwrap().pattern.to_string(), "a | b");
    assert_eq!(registry.get(seq).unwrap().pattern.to_string(), "a b");
}
