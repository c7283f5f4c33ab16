//! Generated Python launcher stubs.
//!
//! Each wheel ships a small pure-Python package whose `main` locates the
//! bundled binary at `bin/<name>` next to it and hands over execution. The
//! exec-vs-spawn choice is made here, at generation time, from the target
//! platform: the target is fixed per archive, so the generated launcher
//! carries only the branch it needs.

use handlebars::Handlebars;
use serde_json::json;

use super::AssembleError;

/// Launcher for targets with process replacement: the binary takes over this
/// process via `execvp`, so arguments, streams and exit status all pass
/// through untouched. The executable bit is restored first; zip-based
/// installers do not always preserve it.
const INIT_PY_EXEC: &str = r#""""Go binary packaged as a Python wheel."""

import os
import stat
import sys

__version__ = "{{version}}"


def get_binary_path():
    """Return the path to the bundled binary."""
    return os.path.join(os.path.dirname(__file__), "bin", "{{binary_name}}")


def main():
    """Replace this process with the bundled binary."""
    binary = get_binary_path()

    mode = os.stat(binary).st_mode
    if not mode & stat.S_IXUSR:
        os.chmod(binary, mode | stat.S_IXUSR | stat.S_IXGRP | stat.S_IXOTH)

    os.execvp(binary, [binary] + sys.argv[1:])
"#;

/// Launcher for targets without process replacement (Windows): the binary
/// runs as a child and its exit status is forwarded unchanged.
const INIT_PY_SPAWN: &str = r#""""Go binary packaged as a Python wheel."""

import os
import subprocess
import sys

__version__ = "{{version}}"


def get_binary_path():
    """Return the path to the bundled binary."""
    return os.path.join(os.path.dirname(__file__), "bin", "{{binary_name}}")


def main():
    """Run the bundled binary and forward its exit status."""
    binary = get_binary_path()
    sys.exit(subprocess.call([binary] + sys.argv[1:]))
"#;

/// Renders the `__init__.py` launcher member.
///
/// `exec_supported` selects the process-replacement launcher; pass `false`
/// for Windows targets.
pub fn generate_init_py(
    version: &str,
    binary_name: &str,
    exec_supported: bool,
) -> Result<String, AssembleError> {
    let template = if exec_supported {
        INIT_PY_EXEC
    } else {
        INIT_PY_SPAWN
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .render_template(
            template,
            &json!({
                "version": version,
                "binary_name": binary_name,
            }),
        )
        .map_err(|e| AssembleError::Template(e.to_string()))
}

/// The `__main__.py` member, so `python -m <package>` also works.
pub fn generate_main_py() -> String {
    "from . import main\nmain()\n".to_string()
}
