//! Common constants used throughout tmpl.

/// Permissions of generated directories: rwx for the owner, r-x for others.
pub const DEFAULT_PERMISSIONS: u32 = 0o755;

/// Environment variable overriding the template store location.
pub const TEMPLATES_DIR_ENV: &str = "TMPL_TEMPLATES_DIR";

/// Store location relative to the home directory.
pub const DEFAULT_TEMPLATES_DIR: [&str; 2] = [".tmpl", "templates"];

/// Spec written by `tmpl new`.
pub const BLANK_SPEC: &str = r#"# Display name of the template, shown nowhere but here.
name: example

# Variables can be used in file contents with {{ variable }}.
# Override them when generating: tmpl gen <template> project=other
variables:
  project: test-project

# An example cmake project
template:
  files:
    - name: CMakeLists.txt
      content: |
        cmake_minimum_required(VERSION 3.1...3.21)

        # Fill in the project variable defined in variables
        project({{ project }} VERSION 1.0 LANGUAGES C)

        add_executable({{ project | snake }} src/main.c)

  # Here's a directory containing some C code.
  dirs:
    - name: src
      files:
        - name: main.c
          content: |
            #include <stdio.h>

            int main() {
                printf("Hello from {{ yell(project) }}!\n");
                return 0;
            }
"#;
