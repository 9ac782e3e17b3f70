//! Integration tests for the full parse → compile → emit pipeline.

use hyperforge::compiler::{compile, CompileErrorKind};
use hyperforge::constants::HYPER_VARIABLE;
use hyperforge::karabiner::{emit_document, render, EmitSettings};
use hyperforge::parser::parse_layer_str;

mod fixtures;
use fixtures::*;

fn compile_str(input: &str) -> hyperforge::compiler::CompileOutput {
    let document = parse_layer_str(input).expect("document should parse");
    compile(&document.layers, HYPER_VARIABLE).expect("document should compile")
}

#[test]
fn test_determinism_byte_identical_output() {
    let render_once = || {
        let document = parse_layer_str(LAYERS_FULL).unwrap();
        let output = compile(&document.layers, HYPER_VARIABLE).unwrap();
        render(&emit_document(&document, &output, &EmitSettings::default())).unwrap()
    };

    assert_eq!(render_once(), render_once());
}

#[test]
fn test_scenario_single_chord() {
    // { o: { n: LaunchApp("Notion") } } compiles to exactly 2 rules.
    let output = compile_str(LAYERS_BASIC);
    assert_eq!(output.rules.len(), 2);

    let arming = &output.rules[0];
    assert_eq!(arming.from.key_code, "o");
    assert_eq!(arming.conditions.len(), 1);
    assert_eq!(arming.conditions[0].name, "hyper");
    assert_eq!(arming.conditions[0].value, 1);
    assert_eq!(
        arming.to[0].set_variable.as_ref().unwrap().name,
        "hyper_sublayer_o"
    );
    assert_eq!(arming.to[0].set_variable.as_ref().unwrap().value, 1);
    assert_eq!(
        arming.to_after_key_up[0].set_variable.as_ref().unwrap().value,
        0
    );

    let firing = &output.rules[1];
    assert_eq!(firing.from.key_code, "n");
    let condition_names: Vec<&str> =
        firing.conditions.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(condition_names, vec!["hyper", "hyper_sublayer_o"]);
    assert!(firing.conditions.iter().all(|c| c.value == 1));
    assert_eq!(
        firing.to[0].shell_command.as_deref(),
        Some("open -a 'Notion.app'")
    );
    assert!(firing.to_if_alone.is_empty());
}

#[test]
fn test_scenario_key_output_chord() {
    // { w: { semicolon: KeyOutput("h", [right_command]) } }
    let output = compile_str(
        r#"{ layers: { w: { semicolon: { key: "h", modifiers: ["right_command"] } } } }"#,
    );

    let firing = &output.rules[1];
    assert_eq!(firing.from.key_code, "semicolon");
    assert_eq!(firing.to.len(), 1);
    assert_eq!(firing.to[0].key_code.as_deref(), Some("h"));
    assert_eq!(firing.to[0].modifiers, vec!["right_command".to_string()]);

    let condition_names: Vec<&str> =
        firing.conditions.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(condition_names, vec!["hyper", "hyper_sublayer_w"]);
}

#[test]
fn test_scenario_self_leaf_alone_fallback() {
    // { v: { v: action } } compiles to exactly 1 rule: the arming rule
    // carries the action as its tap-alone fallback.
    let output = compile_str(r#"{ layers: { v: { v: { app: "Vim" } } } }"#);

    assert_eq!(output.rules.len(), 1);
    let arming = &output.rules[0];
    assert_eq!(arming.from.key_code, "v");
    assert_eq!(
        arming.to_if_alone[0].shell_command.as_deref(),
        Some("open -a 'Vim.app'")
    );
    assert!(output.warnings.is_empty());
}

#[test]
fn test_group_isolation_shared_leaf_symbols() {
    let output = compile_str(
        r#"{ layers: {
            o: { h: { open: "https://github.com" } },
            w: { h: { window: "left-half" } },
        } }"#,
    );

    for rule in &output.rules {
        let Some(group) = &rule.group else { continue };
        let own_flag = format!("hyper_sublayer_{group}");
        let other_flag = if group.as_str() == "o" {
            "hyper_sublayer_w"
        } else {
            "hyper_sublayer_o"
        };

        let is_firing = rule.to.first().is_some_and(|t| t.set_variable.is_none());
        if is_firing {
            assert!(
                rule.conditions.iter().any(|c| c.name == own_flag && c.value == 1),
                "firing rule must require its own group flag"
            );
            assert!(
                rule.conditions.iter().all(|c| c.name != other_flag),
                "firing rule must not reference the other group's flag"
            );
        }
    }
}

#[test]
fn test_conflict_rejection_duplicate_group() {
    let error = parse_layer_str(LAYERS_DUPLICATE_GROUP).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::DuplicateGroupKey);
}

#[test]
fn test_count_invariant() {
    // 4 root entries: 1 direct binding + 3 groups with 3 + 3 + 2
    // leaves, one of which is a self-leaf (excluded from firing count).
    let output = compile_str(LAYERS_FULL);

    let arming_count = 3;
    let firing_count = 2 + 3 + 2; // o (self-leaf excluded), w, v
    let direct_count = 1;
    assert_eq!(
        output.rules.len(),
        arming_count + firing_count + direct_count
    );
}

#[test]
fn test_emitted_document_matches_engine_schema() {
    let document = parse_layer_str(LAYERS_FULL).unwrap();
    let output = compile(&document.layers, HYPER_VARIABLE).unwrap();
    let config = emit_document(&document, &output, &EmitSettings::default());
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["global"]["show_in_menu_bar"], true);
    // The document's profile section wins over settings.
    assert_eq!(json["profiles"][0]["name"], "Test");

    let rules = json["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .unwrap();

    // Hyper definition first, pass-through second, then generated.
    assert_eq!(rules[0]["description"], "caps_lock -> Hyper Key");
    assert_eq!(rules[1]["description"], "F6 -> Single monitor chat setup");
    assert_eq!(rules[2]["description"], "Hyper Key + spacebar");
    assert_eq!(rules[3]["description"], "Hyper Key sublayer \"o\"");

    // Every generated manipulator is a basic manipulator with
    // variable_if conditions only.
    for rule in rules.iter().skip(2) {
        for manipulator in rule["manipulators"].as_array().unwrap() {
            assert_eq!(manipulator["type"], "basic");
            if let Some(conditions) = manipulator["conditions"].as_array() {
                for condition in conditions {
                    assert_eq!(condition["type"], "variable_if");
                }
            }
        }
    }
}

#[test]
fn test_direct_binding_requires_all_groups_idle() {
    let document = parse_layer_str(LAYERS_FULL).unwrap();
    let output = compile(&document.layers, HYPER_VARIABLE).unwrap();

    let direct = output
        .rules
        .iter()
        .find(|r| r.group.is_none())
        .expect("direct binding");
    assert_eq!(direct.from.key_code, "spacebar");

    let names: Vec<&str> = direct.conditions.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "hyper_sublayer_o",
            "hyper_sublayer_w",
            "hyper_sublayer_v",
            "hyper"
        ]
    );
    assert_eq!(direct.conditions[0].value, 0);
    assert_eq!(direct.conditions[3].value, 1);
}

#[test]
fn test_custom_fragment_description_and_payload() {
    let output = compile_str(LAYERS_FULL);

    let hide = output
        .rules
        .iter()
        .find(|r| r.description == "Window: Hide")
        .expect("custom fragment rule");
    assert_eq!(hide.from.key_code, "semicolon");
    assert_eq!(hide.to[0].key_code.as_deref(), Some("h"));
    assert_eq!(hide.to[0].modifiers, vec!["right_command".to_string()]);
}
