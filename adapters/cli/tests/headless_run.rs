use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn last_stand(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_last-stand"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch the last-stand binary")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("last-stand-{}-{name}", std::process::id()))
}

#[test]
fn headless_run_logs_a_summary() {
    let output = last_stand(&["--headless-ticks", "120", "--seed", "3"]);
    let log = stderr(&output);

    assert!(output.status.success(), "{log}");
    assert!(log.contains("headless run: 120 ticks, wave 1"), "{log}");
    assert!(!log.contains("audio cue"));
}

#[test]
fn repeated_verbose_flags_trace_audio_cues() {
    let output = last_stand(&["--headless-ticks", "300", "-vv"]);
    let log = stderr(&output);

    assert!(output.status.success(), "{log}");
    assert!(log.contains("wave 1 started"), "{log}");
    assert!(log.contains("audio cue"), "{log}");
}

#[test]
fn frame_dump_writes_a_ppm_image() {
    let path = scratch_file("frame.ppm");
    let path_text = path.to_string_lossy().into_owned();
    let output = last_stand(&["--headless-ticks", "30", "--frame-dump", &path_text]);
    assert!(output.status.success(), "{}", stderr(&output));

    let image = fs::read(&path).expect("frame dump exists");
    let _ = fs::remove_file(&path);
    assert!(image.starts_with(b"P6\n320 200\n255\n"));
}

#[test]
fn invalid_config_file_fails_with_context() {
    let path = scratch_file("broken.toml");
    fs::write(&path, "[waves]\nlive_cap = 0\n").expect("write config");
    let path_text = path.to_string_lossy().into_owned();

    let output = last_stand(&["--config", &path_text, "--headless-ticks", "1"]);
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("live_cap"), "{}", stderr(&output));
}
