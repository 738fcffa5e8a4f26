//! End-to-end extraction tests against whole model documents

use serde_json::json;
use xml2models::core::{DataType, Database};
use xml2models::extract;
use xml2models::model::ModelDatabase;

const LIBRARY: &str = include_str!("fixtures/library.xml");

fn library() -> ModelDatabase {
    extract(LIBRARY, "library.xml").expect("fixture extracts")
}

mod classes {
    use super::*;

    #[test]
    fn test_classes_in_document_order() {
        let db = library();
        let ids: Vec<_> = db.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["Book", "Article", "Person"]);
    }

    #[test]
    fn test_definition_joins_nested_text() {
        let db = library();
        assert_eq!(
            db.class("Book").unwrap().definition,
            "A published written work."
        );
        assert_eq!(db.class("Person").unwrap().definition, "");
    }

    #[test]
    fn test_minimal_document() {
        let db = extract(r#"<model><classes><class ID="C1"/></classes></model>"#, "c1.xml").unwrap();
        assert_eq!(
            serde_json::to_value(&db).unwrap(),
            json!({
                "classes": {"C1": {"definition": "", "properties": {}}},
                "relations": {},
                "filename": "c1.xml"
            })
        );
    }

    #[test]
    fn test_repeated_class_id_replaces_entry() {
        let db = extract(
            r#"<model><classes>
                <class ID="A"><definition>first</definition></class>
                <class ID="B"/>
                <class ID="A"><definition>second</definition></class>
            </classes></model>"#,
            "m.xml",
        )
        .unwrap();
        let ids: Vec<_> = db.classes().keys().collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(db.class("A").unwrap().definition, "second");
    }

    #[test]
    fn test_document_without_classes() {
        let db = extract("<model/>", "empty.xml").unwrap();
        assert_eq!(db.class_count(), 0);
        assert_eq!(db.relation_count(), 0);
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_property_order_and_exclusions() {
        let db = library();
        let keys: Vec<_> = db.class("Book").unwrap().properties.keys().collect();
        assert_eq!(
            keys,
            vec!["title", "pages", "price", "abstract", "format", "genre"]
        );
    }

    #[test]
    fn test_datatype_tags() {
        let db = library();
        let props = &db.class("Book").unwrap().properties;
        assert_eq!(props["title"].datatype, DataType::CharField);
        assert_eq!(props["pages"].datatype, DataType::IntegerField);
        assert_eq!(props["price"].datatype, DataType::FloatField);
        assert_eq!(props["abstract"].datatype, DataType::TextField);
        assert_eq!(props["format"].datatype, DataType::ChoiceField);
        assert_eq!(props["abstract"].note, "Summary & scope");
    }

    #[test]
    fn test_choice_field_with_vocabulary() {
        let db = library();
        let format = &db.class("Book").unwrap().properties["format"];
        assert_eq!(format.length(), Some(3));
        assert_eq!(
            format.choices().unwrap(),
            &["a".to_string(), "bb".to_string(), "ccc".to_string()]
        );
    }

    #[test]
    fn test_choice_field_without_vocabulary() {
        let db = library();
        let genre = &db.class("Book").unwrap().properties["genre"];
        assert!(genre.vocabulary.is_none());
        assert_eq!(
            serde_json::to_value(genre).unwrap(),
            json!({"name": "Genre", "note": "Free genre", "datatype": "choicefield"})
        );
    }

    #[test]
    fn test_vocabulary_duplicates_are_kept() {
        let db = extract(
            r#"<root>
                <model><classes><class ID="C"><properties>
                    <property ID="C.kind"><name>Kind</name><note>k</note>
                        <datatypeName target="choiceField" vocabRef="kinds"/></property>
                </properties></class></classes></model>
                <vocab ID="kinds"><values><list><item>x</item><item>long</item><item>x</item></list></values></vocab>
            </root>"#,
            "m.xml",
        )
        .unwrap();
        let kind = &db.class("C").unwrap().properties["kind"];
        assert_eq!(kind.length(), Some(4));
        assert_eq!(kind.choices().unwrap(), &["x", "long", "x"]);
    }

    #[test]
    fn test_unresolvable_vocabulary_fails() {
        let err = extract(
            r#"<model><classes><class ID="C"><properties>
                <property ID="C.kind"><name>Kind</name><note>k</note>
                    <datatypeName target="choiceField" vocabRef="missing"/></property>
            </properties></class></classes></model>"#,
            "m.xml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("'missing'"));
    }

    #[test]
    fn test_vocabulary_ref_ignored_for_non_choice() {
        let db = extract(
            r#"<model><classes><class ID="C"><properties>
                <property ID="C.kind"><name>Kind</name><note>k</note>
                    <datatypeName target="shortText" vocabRef="missing"/></property>
            </properties></class></classes></model>"#,
            "m.xml",
        )
        .unwrap();
        assert!(db.class("C").unwrap().properties["kind"].vocabulary.is_none());
    }

    #[test]
    fn test_every_unknown_datatype_fails() {
        for datatype in ["date", "boolean", "Float", "choicefield", ""] {
            let input = format!(
                r#"<model><classes><class ID="C"><properties>
                    <property ID="C.x"><name>X</name><note>x</note><datatypeName target="{datatype}"/></property>
                </properties></class></classes></model>"#
            );
            assert!(extract(&input, "m.xml").is_err(), "datatype {:?}", datatype);
        }
    }
}

mod relations {
    use super::*;

    #[test]
    fn test_relation_ids_are_normalized() {
        let db = library();
        let ids: Vec<_> = db.edges().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["has_author", "written_in_language", "gehort_zu"]);
    }

    #[test]
    fn test_relations_merge_across_classes() {
        let db = library();
        let rel = db.relation("has_author").unwrap();
        assert_eq!(rel.subjects, vec!["Book", "Article"]);
        assert_eq!(rel.objects, vec!["Person", "Group"]);
        assert_eq!(rel.name, "has author");
        assert_eq!(rel.name_reverse, "is author of");
        assert_eq!(rel.orid, "HasAuthor");
    }

    #[test]
    fn test_accented_relation_keeps_labels() {
        let db = library();
        let rel = db.relation("gehort_zu").unwrap();
        assert_eq!(rel.orid, "GehortZu");
        assert_eq!(rel.name, "gehört zu");
        assert_eq!(rel.name_reverse, "enthält");
    }

    #[test]
    fn test_reverse_name_mismatch_keeps_first() {
        let db = extract(
            r#"<model><classes>
                <class ID="A"><relations><relation ID="IsPartOf">
                    <sourceClass target="A"/><targetClass target="B"/>
                    <name>is part of</name><reverseName>has part</reverseName>
                </relation></relations></class>
                <class ID="C"><relations><relation ID="IsPartOf">
                    <sourceClass target="C"/><targetClass target="D"/>
                    <name>is part of</name><reverseName>contains</reverseName>
                </relation></relations></class>
            </classes></model>"#,
            "m.xml",
        )
        .unwrap();
        let rel = db.relation("is_part_of").unwrap();
        assert_eq!(rel.subjects, vec!["A"]);
        assert_eq!(rel.objects, vec!["B"]);
        assert_eq!(rel.name_reverse, "has part");
    }

    #[test]
    fn test_relation_without_id_fails() {
        let err = extract(
            r#"<model><classes><class ID="A"><relations><relation>
                <sourceClass target="A"/><targetClass target="B"/>
                <name>n</name><reverseName>r</reverseName>
            </relation></relations></class></classes></model>"#,
            "m.xml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("@ID"));
    }

    #[test]
    fn test_relation_without_reverse_name_fails() {
        let err = extract(
            r#"<model><classes><class ID="A"><relations><relation ID="R">
                <sourceClass target="A"/><targetClass target="B"/>
                <name>n</name>
            </relation></relations></class></classes></model>"#,
            "m.xml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("<reverseName>"));
    }
}
