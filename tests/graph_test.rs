//! Integration tests for `cogci graph`

mod common;

use common::{stdout, TestProject, CYCLIC_CATALOG, SAMPLE_CATALOG};

#[test]
fn test_graph_prints_dot() {
    let project = TestProject::new();
    project.write_catalog(SAMPLE_CATALOG);
    for name in ["cogutil", "atomspace", "ure", "unify"] {
        project.add_component(name);
    }

    let output = project.run(&["graph"]);
    let dot = stdout(&output);

    assert!(output.status.success());
    assert!(dot.starts_with("digraph components {"));
    assert!(dot.contains("\"cogutil\" -> \"atomspace\";"));
    assert!(dot.contains("\"unify\" -> \"ure\";"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_graph_marks_absent_dependencies() {
    let project = TestProject::new();
    project.write_catalog(SAMPLE_CATALOG);
    for name in ["cogutil", "atomspace", "ure"] {
        project.add_component(name);
    }

    let dot = stdout(&project.run(&["graph"]));

    assert!(dot.contains("\"unify\" [style=dashed, color=grey];"));
    assert!(dot.contains("\"unify\" -> \"ure\" [style=dashed, color=grey];"));
}

#[test]
fn test_graph_highlights_cycle() {
    let project = TestProject::new();
    project.write_catalog(CYCLIC_CATALOG);
    for name in ["cogutil", "a", "b"] {
        project.add_component(name);
    }

    let output = project.run(&["graph"]);
    let dot = stdout(&output);

    assert!(output.status.success());
    assert!(dot.contains("\"a\" [color=red];"));
    assert!(dot.contains("\"b\" [color=red];"));
    assert!(dot.contains("    \"cogutil\";"));
}
