//! A stand-in Java installation made of shell scripts.
//!
//! `javac` "compiles" the helper by touching the artifact; `java` speaks the
//! helper's line protocol, choosing its behaviour from the schema file name:
//!
//! * `crash.xsd`: fatal line on stderr, exit 3, no `result=` line
//! * `silent.xsd`: noise only, exit 0
//! * `silent-fail.xsd`: nothing at all, exit 1
//! * `remote.xsd`: valid only when `-insecure` is passed
//! * anything else: valid iff the document contains a `<b` element

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xsd_schema_validator::{Validator, ValidatorConfig};

const JAVAC_SCRIPT: &str = r#"#!/bin/sh
STATE="@STATE@"
echo "$PWD $*" >> "$STATE/javac.log"
sleep 0.1
if [ -f "$STATE/javac.fail" ]; then
    echo "XMLValidator.java:1: error: class, interface, or enum expected" >&2
    exit 2
fi
mkdir -p support
touch support/XMLValidator.class
exit 0
"#;

const JAVA_SCRIPT: &str = r#"#!/bin/sh
STATE="@STATE@"
printf '%s\n' "$@" > "$STATE/java.args.$$"
mv "$STATE/java.args.$$" "$STATE/java.args"

insecure=0
input=""
schema=""
for arg in "$@"; do
    case "$arg" in
        -insecure) insecure=1 ;;
        -stdin) input="-" ;;
        -file=*) input="${arg#-file=}" ;;
        -schema=*) schema="${arg#-schema=}" ;;
    esac
done

doc="$STATE/java.input.$$"
if [ "$input" = "-" ]; then
    cat > "$doc"
else
    cat "$input" > "$doc"
fi
cp "$doc" "$STATE/java.input"

case "$schema" in
    *crash.xsd)
        echo "[fatal] java.lang.OutOfMemoryError: Java heap space" >&2
        exit 3
        ;;
    *silent.xsd)
        echo "Picked up JAVA_TOOL_OPTIONS: -Xmx64m"
        exit 0
        ;;
    *silent-fail.xsd)
        exit 1
        ;;
    *remote.xsd)
        if [ "$insecure" -eq 1 ]; then
            echo "result=OK"
            exit 0
        fi
        echo "[fatal] External access to http://example.com/types.xsd is not allowed" >&2
        echo "result=FATAL_ERROR"
        exit 1
        ;;
esac

if grep -q '<b' "$doc"; then
    echo "Picked up JAVA_TOOL_OPTIONS: -Xmx64m"
    echo "result=OK"
    exit 0
fi

echo "[error] cvc-elt.1.a: Cannot find the declaration of element 'a'. (1:26)"
echo "[warning] Schema location hint ignored (1:1)" >&2
echo "result=WITH_ERRORS"
exit 1
"#;

pub const INVALID_DIAGNOSTIC: &str =
    "[error] cvc-elt.1.a: Cannot find the declaration of element 'a'. (1:26)";
pub const INVALID_WARNING: &str = "[warning] Schema location hint ignored (1:1)";

pub struct FakeRuntime {
    pub java_home: TempDir,
    pub base_dir: TempDir,
    pub work_dir: TempDir,
    state_dir: TempDir,
}

impl FakeRuntime {
    pub fn new() -> Self {
        let runtime = Self {
            java_home: TempDir::new().unwrap(),
            base_dir: TempDir::new().unwrap(),
            work_dir: TempDir::new().unwrap(),
            state_dir: TempDir::new().unwrap(),
        };

        let bin = runtime.java_home.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        runtime.install(&bin.join("javac"), JAVAC_SCRIPT);
        runtime.install(&bin.join("java"), JAVA_SCRIPT);
        runtime
    }

    fn install(&self, path: &Path, script: &str) {
        let state = self.state_dir.path().to_string_lossy();
        std::fs::write(path, script.replace("@STATE@", &state)).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_java_home(self.java_home.path())
            .with_base_dir(self.base_dir.path())
            .with_working_dir(self.work_dir.path())
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.config())
    }

    /// Remove the fake compiler, leaving only `java`
    pub fn remove_compiler(&self) {
        std::fs::remove_file(self.java_home.path().join("bin").join("javac")).unwrap();
    }

    /// Make every subsequent `javac` run fail
    pub fn break_compiler(&self) {
        std::fs::write(self.state_dir.path().join("javac.fail"), "").unwrap();
    }

    pub fn javac_invocations(&self) -> usize {
        std::fs::read_to_string(self.state_dir.path().join("javac.log"))
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    pub fn javac_log(&self) -> String {
        std::fs::read_to_string(self.state_dir.path().join("javac.log")).unwrap_or_default()
    }

    /// Arguments of the most recent `java` run, one per element
    pub fn last_java_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.state_dir.path().join("java.args"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Document bytes the most recent `java` run received
    pub fn last_java_input(&self) -> Vec<u8> {
        std::fs::read(self.state_dir.path().join("java.input")).unwrap()
    }

    pub fn artifact(&self) -> PathBuf {
        self.base_dir.path().join("support").join("XMLValidator.class")
    }

    pub fn schema(&self, name: &str) -> PathBuf {
        let path = self.work_dir.path().join(name);
        std::fs::write(&path, "<xs:schema/>").unwrap();
        path
    }
}
