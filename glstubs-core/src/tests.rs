//! End-to-end tests over synthetic Blender checkouts.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const GL_DEPRECATED: &str = "\
/* gl-deprecated.h */
#ifndef __GL_DEPRECATED_H__
#define __GL_DEPRECATED_H__

#define glAccum DO_NOT_USE_glAccum
#define glRenderMode DO_NOT_USE_glRenderMode
#define glBegin DO_NOT_USE_glBegin
#define glColorTableEXT DO_NOT_USE_glColorTableEXT
#define GL_SOURCE2_RGB DO_NOT_USE_GL_SOURCE2_RGB
#define GL_QUADS DO_NOT_USE_GL_QUADS

#endif
";

const GLEW: &str = "\
#define GLAPIENTRY
GLAPI void GLAPIENTRY glAccum (GLenum op, GLfloat value);
GLAPI void GLAPIENTRY glBegin (GLenum mode);
GLAPI GLint GLAPIENTRY glRenderMode (GLenum mode);
GLAPI const GLubyte * GLAPIENTRY glGetString (GLenum name);
typedef void (GLAPIENTRY * PFNGLCOLORTABLEEXTPROC) (GLenum target);
";

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_checkout() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("glstubs_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    write_file(&dir.join("intern/glew-mx/intern/gl-deprecated.h"), GL_DEPRECATED);
    write_file(&dir.join("extern/glew/include/GL/glew.h"), GLEW);
    fs::create_dir_all(dir.join("source/blender")).unwrap();
    dir
}

fn add_source(root: &Path, rel: &str, content: &str) {
    write_file(&root.join("source/blender").join(rel), content);
}

// Full pipeline without the usage filter: every symbol is stubbed.
#[test]
fn test_unfiltered_pipeline() {
    let root = setup_checkout();
    let report = Glstubs::new(&root).filter_unused(false).generate().unwrap();

    assert_eq!(
        report.enum_targets,
        vec!["DO_NOT_USE_GL_SOURCE2_RGB", "DO_NOT_USE_GL_QUADS"]
    );
    assert_eq!(
        report.resolved,
        vec![
            "_GL_VOID DO_NOT_USE_glAccum (GLenum op, GLfloat value) _GL_VOID_RET",
            "_GL_INT DO_NOT_USE_glRenderMode (GLenum mode) _GL_INT_RET",
            "_GL_VOID DO_NOT_USE_glBegin (GLenum mode) _GL_VOID_RET",
        ]
    );
    assert_eq!(report.unresolved, vec!["glColorTableEXT"]);
    assert_eq!(report.stats.deprecated_functions, 4);
    assert_eq!(report.stats.glew_prototypes, 4);
    assert_eq!(report.stats.scanned_files, None);
}

// Usage filter keeps only symbols mentioned by included, non-excluded files.
#[test]
fn test_usage_filter() {
    let root = setup_checkout();
    add_source(&root, "gpu/intern/gpu_draw.c", "glBegin(GL_QUADS);\n");
    add_source(&root, "editors/render.cpp", "glRenderMode(GL_SELECT);\n");
    add_source(&root, "python/generic/bgl.c", "glAccum(GL_ACCUM, 1.0f); GL_SOURCE2_RGB");
    add_source(&root, "tools/check.c", "glColorTableEXT");
    add_source(&root, "gpu/README.txt", "glAccum");

    let report = Glstubs::new(&root).generate().unwrap();

    assert_eq!(report.enum_targets, vec!["DO_NOT_USE_GL_QUADS"]);
    assert_eq!(
        report.resolved,
        vec![
            "_GL_INT DO_NOT_USE_glRenderMode (GLenum mode) _GL_INT_RET",
            "_GL_VOID DO_NOT_USE_glBegin (GLenum mode) _GL_VOID_RET",
        ]
    );
    assert!(report.unresolved.is_empty());
    assert_eq!(report.stats.scanned_files, Some(2));
    assert_eq!(report.stats.used_functions, 2);
}

// Unresolved names only show up when they are used.
#[test]
fn test_used_but_unresolved() {
    let root = setup_checkout();
    add_source(&root, "gpu/gpu_ext.c", "glColorTableEXT(GL_TEXTURE_2D);");

    let report = Glstubs::new(&root).generate().unwrap();
    assert!(report.resolved.is_empty());
    assert_eq!(report.unresolved, vec!["glColorTableEXT"]);
    assert!(report.has_unresolved());
}

// run() writes both files with the expected contents.
#[test]
fn test_run_writes_outputs() {
    let root = setup_checkout();
    add_source(&root, "gpu/gpu_draw.c", "glBegin(GL_QUADS); glColorTableEXT();");
    let out = root.join("out");

    let report = Glstubs::new(&root).output_dir(&out).run().unwrap();

    let stubs = fs::read_to_string(out.join("stubs.c")).unwrap();
    assert!(stubs.starts_with("\n/**\n * List automatically generated"));
    assert!(stubs.contains("#define DO_NOT_USE_GL_QUADS 0"));
    assert!(stubs.contains("_GL_VOID DO_NOT_USE_glBegin (GLenum mode) _GL_VOID_RET"));
    assert!(stubs.ends_with("End of automatically generated list\n */\n"));

    let errors = fs::read_to_string(out.join("stubs.err")).unwrap();
    assert_eq!(errors, "glColorTableEXT");
    assert_eq!(
        report.summary_line(),
        format!(
            "Results written to {} and {}",
            out.join("stubs.err").display(),
            out.join("stubs.c").display()
        )
    );
}

// An empty error report is still written.
#[test]
fn test_empty_error_file_written() {
    let root = setup_checkout();
    let out = root.join("out");
    Glstubs::new(&root).output_dir(&out).run().unwrap();

    assert_eq!(fs::read_to_string(out.join("stubs.err")).unwrap(), "");
    let stubs = fs::read_to_string(out.join("stubs.c")).unwrap();
    assert!(!stubs.contains("ENUM values"));
    assert!(!stubs.contains("Functions"));
}

// Progress callback sees stages in order.
#[test]
fn test_progress_order() {
    let root = setup_checkout();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    Glstubs::new(&root)
        .output_dir(root.join("out"))
        .on_progress(move |stage| sink.lock().unwrap().push(stage))
        .run()
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Stage::GreppingEnums, Stage::GreppingFunctions, Stage::WritingOutput]
    );
}

// Missing headers surface as typed errors through anyhow.
#[test]
fn test_missing_glew_is_typed() {
    let root = setup_checkout();
    fs::remove_file(root.join("extern/glew/include/GL/glew.h")).unwrap();

    let err = Glstubs::new(&root).generate().unwrap_err();
    let typed = err.downcast_ref::<GlstubsError>().unwrap();
    assert_eq!(typed.exit_code(), 4);
}

// Unknown return types abort unless skipping is enabled.
#[test]
fn test_unknown_type_handling() {
    let root = setup_checkout();
    let glew = root.join("extern/glew/include/GL/glew.h");
    write_file(&glew, &format!("{GLEW}GLAPI GLfloat GLAPIENTRY glFoo (void);\n"));

    let err = Glstubs::new(&root).filter_unused(false).generate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GlstubsError>(),
        Some(GlstubsError::UnknownType { .. })
    ));

    let report = Glstubs::new(&root)
        .filter_unused(false)
        .skip_unknown_types(true)
        .generate()
        .unwrap();
    assert_eq!(report.resolved.len(), 3);
}

// Config file settings flow through the builder.
#[test]
fn test_config_driven_run() {
    let root = setup_checkout();
    add_source(&root, "tools/uses.c", "glAccum");
    fs::write(
        root.join(CONFIG_FILE_NAME),
        "excludes = [\"*.git\"]\n\n[output]\ndir = \"gen\"\nerrors = \"missing.txt\"\n",
    )
    .unwrap();

    let config = load_config(&root).unwrap().unwrap();
    let builder = Glstubs::new(&root).with_config(config);
    let report = builder.generate().unwrap();

    assert_eq!(
        report.resolved,
        vec!["_GL_VOID DO_NOT_USE_glAccum (GLenum op, GLfloat value) _GL_VOID_RET"]
    );
    assert_eq!(report.outputs.errors, PathBuf::from("gen/missing.txt"));
}

// Missing source tree: filter sees no files, nothing is stubbed.
#[test]
fn test_missing_source_tree() {
    let root = setup_checkout();
    fs::remove_dir_all(root.join("source")).unwrap();

    let report = Glstubs::new(&root).generate().unwrap();
    assert_eq!(report.stats.scanned_files, Some(0));
    assert!(report.enum_targets.is_empty());
    assert!(report.resolved.is_empty());
}
