//! GitHub Actions workflow rendering
//!
//! Turns the selected components of a [`BuildPlan`] into a workflow with one
//! build step per component, a combined test step, and artifact uploads.
//! Only names and order come from the plan.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::catalog::Settings;
use crate::core::plan::BuildPlan;
use crate::error::WorkflowError;

const EMPTY_MARKER: &str = "# no components selected";

/// Render the workflow for a plan
pub fn render(plan: &BuildPlan, settings: &Settings) -> String {
    let mut out = String::new();
    render_header(&mut out, settings);

    if plan.selected.is_empty() {
        let _ = writeln!(out, "      {EMPTY_MARKER}");
    }
    for name in &plan.selected {
        render_build_step(&mut out, name, &settings.repository_base);
    }

    out.push_str("      # Run Tests for Each Component\n");
    out.push_str("      - name: Run Tests\n");
    out.push_str("        run: |\n");
    per_component(&mut out, plan, |out, name| {
        let _ = writeln!(out, "          # {name} Tests");
        let _ = writeln!(out, "          cd {name}/build");
        out.push_str("          make tests\n");
        out.push_str("          make check ARGS=\"$MAKEFLAGS\"\n");
        out.push_str("          cd ../..\n");
    });
    out.push('\n');

    out.push_str("      # Upload Test Logs\n");
    out.push_str("      - name: Upload Test Logs\n");
    out.push_str("        if: always()\n");
    out.push_str("        uses: actions/upload-artifact@v4\n");
    out.push_str("        with:\n");
    out.push_str("          name: test-logs\n");
    out.push_str("          path: |\n");
    for name in &plan.selected {
        let _ = writeln!(out, "            {name}/build/Testing/Temporary/LastTest.log");
    }
    out.push('\n');

    out.push_str("      # (Optional) Package Components\n");
    out.push_str("      - name: Package Components\n");
    out.push_str("        if: github.ref == 'refs/heads/main'\n");
    out.push_str("        run: |\n");
    per_component(&mut out, plan, |out, name| {
        let _ = writeln!(out, "          # {name} Packaging");
        let _ = writeln!(out, "          cd {name}/build");
        let _ = writeln!(
            out,
            "          make package || echo \"{name} package target not defined.\""
        );
        out.push_str("          cd ../..\n");
    });
    out.push('\n');

    out.push_str("      # Upload Build Artifacts\n");
    out.push_str("      - name: Upload Build Artifacts\n");
    out.push_str("        if: always()\n");
    out.push_str("        uses: actions/upload-artifact@v4\n");
    out.push_str("        with:\n");
    out.push_str("          name: build-artifacts\n");
    out.push_str("          path: |\n");
    for name in &plan.selected {
        let _ = writeln!(out, "            {name}/build/");
    }

    out
}

fn render_header(out: &mut String, settings: &Settings) {
    let _ = writeln!(out, "# {}", settings.workflow_path);
    out.push_str("# Auto-generated by cogci. Edit the component catalog, not this file.\n");
    out.push('\n');
    let _ = writeln!(out, "name: {}", settings.workflow_name);
    out.push_str(
        "
on:
  push:
    branches:
      - main
  pull_request:
    branches:
      - main

env:
  CCACHE_DIR: /ws/ccache
  MAKEFLAGS: -j2

jobs:
  build-and-test:
    name: Build and Test All Components
    runs-on: ubuntu-latest
    container:
",
    );
    let _ = writeln!(out, "      image: {}", settings.container_image);
    out.push_str(
        "      options: --user root
      env:
        CCACHE_DIR: /ws/ccache
        MAKEFLAGS: -j2
    services:
      opencog-postgres:
        image: opencog/postgres
        env:
          POSTGRES_USER: opencog_test
          POSTGRES_PASSWORD: cheese
          POSTGRES_DB: atomspace_db
        ports:
          - 5432:5432
        options: >-
          --health-cmd pg_isready
          --health-interval 10s
          --health-timeout 5s
          --health-retries 5
    steps:
      # 1. Checkout the Repository
      - name: Checkout Repository
        uses: actions/checkout@v4

      # 2. Install Build Dependencies
      - name: Install Build Dependencies
        run: |
          sudo apt-get update
          sudo apt-get install -y ccache pkg-config cmake build-essential git

",
    );
}

fn render_build_step(out: &mut String, name: &str, repository_base: &str) {
    let base = repository_base.trim_end_matches('/');
    let _ = writeln!(out, "      # Build and Install {name}");
    let _ = writeln!(out, "      - name: Build and Install {name}");
    out.push_str("        run: |\n");
    out.push_str("          # Clean existing directory\n");
    let _ = writeln!(out, "          rm -rf {name}");
    out.push_str("          # Clone the repository\n");
    let _ = writeln!(out, "          git clone {base}/{name}.git");
    let _ = writeln!(out, "          mkdir -p {name}/build");
    let _ = writeln!(out, "          cd {name}/build");
    out.push_str("          cmake -DCMAKE_BUILD_TYPE=Release ..\n");
    out.push_str("          make -j2\n");
    out.push_str("          sudo make install\n");
    out.push_str("          sudo ldconfig\n");
    out.push_str("          cd ../..\n");
    out.push('\n');
}

/// Emit a block per selected component, separated by blank lines
fn per_component(out: &mut String, plan: &BuildPlan, mut block: impl FnMut(&mut String, &str)) {
    if plan.selected.is_empty() {
        let _ = writeln!(out, "          {EMPTY_MARKER}");
        return;
    }
    for (i, name) in plan.selected.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        block(out, name);
    }
}

/// Compare an existing workflow file with freshly rendered content
pub fn check_up_to_date(
    path: &Path,
    existing: Option<&str>,
    rendered: &str,
) -> Result<(), WorkflowError> {
    match existing {
        None => Err(WorkflowError::Missing {
            path: path.to_path_buf(),
        }),
        Some(current) if current != rendered => Err(WorkflowError::Stale {
            path: path.to_path_buf(),
        }),
        Some(_) => Ok(()),
    }
}
