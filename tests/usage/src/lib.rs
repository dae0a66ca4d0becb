// === Usage tests ===
//
// Everything here goes through the public `casekit` surface, the way a
// downstream crate would use it.

mod declared {
    #![allow(dead_code)]

    // Declaration-only form: the generated type is named after the prefix
    // and a content hash, so this checks expansion rather than behavior.
    casekit::with_env! {
        "Header",
        { let count: casekit::Observed<u32>; }
    }
}

#[cfg(test)]
mod tests {
    use casekit::CaseName;
    use casekit::CaseValue;
    use casekit::IsCase;
    use casekit::IsNotCase;
    use casekit::OptionSet as _;

    #[derive(CaseName, IsCase, IsNotCase, CaseValue)]
    enum Connection {
        Idle,
        Open { port: u16 },
        Closed(Option<String>),
    }

    #[derive(CaseName)]
    #[case_name(snake_case)]
    enum Status {
        NotFound,
        ServerError,
    }

    #[derive(CaseName, IsCase)]
    #[allow(non_camel_case_types)]
    enum Keyword {
        r#type,
        Other,
    }

    casekit::option_set! {
        pub struct Style(u8) {
            enum Options { Bold, Italic, Underline }
        }
    }

    #[test]
    fn case_name_reports_variant_names() {
        assert_eq!(Connection::Idle.case_name(), "Idle");
        assert_eq!(Connection::Open { port: 80 }.case_name(), "Open");
        assert_eq!(Connection::Closed(None).case_name(), "Closed");
    }

    #[test]
    fn case_name_honors_the_style_option() {
        assert_eq!(Status::NotFound.case_name(), "not_found");
        assert_eq!(Status::ServerError.case_name(), "server_error");
    }

    #[test]
    fn raw_identifier_variants_report_plain_names() {
        assert_eq!(Keyword::r#type.case_name(), "type");
        assert!(Keyword::r#type.is_type());
        assert!(!Keyword::Other.is_type());
        assert!(Keyword::r#type.is_among(&[KeywordCases::Type]));
    }

    #[test]
    fn is_case_predicates_are_mutually_exclusive() {
        let connection = Connection::Open { port: 80 };
        assert!(connection.is_open());
        assert!(!connection.is_idle());
        assert!(!connection.is_closed());
    }

    #[test]
    fn is_among_checks_membership() {
        let connection = Connection::Idle;
        assert!(connection.is_among(&[ConnectionCases::Idle, ConnectionCases::Open]));
        assert!(!connection.is_among(&[ConnectionCases::Closed]));
        assert!(connection.is_among_any([ConnectionCases::Idle]));
        assert!(!connection.is_among_any([]));
    }

    #[test]
    fn is_not_case_predicates_negate() {
        let connection = Connection::Idle;
        assert!(connection.is_not_open());
        assert!(connection.is_not_closed());
        assert!(!connection.is_not_idle());
    }

    #[test]
    fn case_value_accessors_return_active_payloads() {
        let open = Connection::Open { port: 443 };
        assert_eq!(open.open_port(), Some(&443));
        assert_eq!(open.closed_string(), None);
        assert_eq!(Connection::Idle.open_port(), None);
    }

    #[test]
    fn option_payloads_are_flattened() {
        let closed = Connection::Closed(Some("bye".to_string()));
        assert_eq!(closed.closed_string(), Some(&"bye".to_string()));
        assert_eq!(Connection::Closed(None).closed_string(), None);
    }

    #[test]
    fn labeled_keys_are_source_text_in_order() {
        let small = 4;
        let large = 16;
        let sizes = casekit::labeled!([small, large, small + large]);
        assert_eq!(sizes.get("small"), Some(&4));
        assert_eq!(sizes.get("large"), Some(&16));
        assert_eq!(sizes.get("small + large"), Some(&20));
        let keys: Vec<_> = sizes.keys().copied().collect();
        assert_eq!(keys, ["small", "large", "small + large"]);
    }

    #[test]
    fn labeled_declaration_form_binds_a_map() {
        let small = 4u32;
        let large = 16u32;
        casekit::labeled! { let sizes: [u32] = [small, large]; }
        assert_eq!(sizes.get("small"), Some(&4));
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn empty_labeled_builds_an_empty_map() {
        let none: casekit::LabeledMap<u8> = casekit::labeled!([]);
        assert!(none.is_empty());
    }

    #[test]
    fn option_set_flags_are_distinct_bits() {
        assert_eq!(Style::BOLD.raw_value(), 1);
        assert_eq!(Style::ITALIC.raw_value(), 2);
        assert_eq!(Style::UNDERLINE.raw_value(), 4);
        assert_eq!(Style::new().raw_value(), 0);
        assert_eq!(Style::default(), Style::new());
    }

    #[test]
    fn option_set_supports_set_algebra() {
        let mut style = Style::BOLD.union(Style::ITALIC);
        assert!(style.contains(Style::BOLD));
        assert!(!style.contains(Style::UNDERLINE));
        style.remove(Style::BOLD);
        assert_eq!(style, Style::ITALIC);
        assert_eq!(Style::from_raw_value(3), Style::BOLD.union(Style::ITALIC));
    }

    #[test]
    fn environment_round_trips_objects_and_values() {
        struct Session {
            user: String,
        }
        let env = casekit::Environment::new()
            .with_object(Session { user: "ada".to_string() })
            .with_value(7u32);
        assert_eq!(env.object::<Session>().user, "ada");
        assert_eq!(*env.value::<u32>(), 7);
    }

    #[test]
    fn with_environment_body_fetches_declared_variables() {
        struct Session {
            user: String,
        }
        let env = casekit::Environment::new()
            .with_object(Session { user: "ada".to_string() })
            .with_value(7u32);
        let view = casekit::with_environment!(
            {
                let session: casekit::ObservedObject<Session>;
                let count: casekit::Observed<u32>;
            },
            format!("{}:{}", session.user, *count)
        );
        assert_eq!(view.body(&env), "ada:7");
    }

    #[test]
    fn labeled_views_labels_the_final_expression() {
        #[casekit::labeled_views]
        fn dashboard() -> casekit::Labeled<i32> {
            let base = 40;
            base + 2
        }
        let result = dashboard();
        assert_eq!(result.label, "base + 2");
        assert_eq!(result.content, 42);
    }

    #[test]
    fn stringified_yields_source_text() {
        let count = 3;
        assert_eq!(casekit::stringified!(count + 1), "count + 1");
        let (text, value) = casekit::dictionarified!(count * 2);
        assert_eq!(text, "count * 2");
        assert_eq!(value, 6);
    }
}
