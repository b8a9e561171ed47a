use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_siakadd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn siakadd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn open_as_admin(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    workspace: &std::path::Path,
) {
    let _ = request_ok(
        stdin,
        reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        stdin,
        reader,
        "login",
        "session.login",
        json!({ "role": "admin" }),
    );
}

fn student_nims(result: &serde_json::Value) -> Vec<String> {
    result
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students array")
        .iter()
        .map(|r| {
            r.get("nim")
                .and_then(|v| v.as_str())
                .expect("nim")
                .to_string()
        })
        .collect()
}

#[test]
fn first_list_returns_the_bundled_dataset_and_persists_it() {
    let workspace = temp_dir("siakad-seed-first");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_as_admin(&mut stdin, &mut reader, &workspace);

    let res = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({}));
    let nims = student_nims(&res);
    assert_eq!(nims, vec!["230101", "230102", "230103", "220204"]);

    let res = request_ok(&mut stdin, &mut reader, "2", "lecturers.list", json!({}));
    let lecturers = res
        .get("lecturers")
        .and_then(|v| v.as_array())
        .expect("lecturers");
    assert_eq!(lecturers.len(), 3);
    assert_eq!(
        lecturers[0].get("nip").and_then(|v| v.as_str()),
        Some("197805152005011002")
    );

    drop(stdin);
    let _ = child.wait();

    // A second process over the same workspace reads the persisted seed, not
    // a fresh one: mutate nothing, expect identical data.
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_as_admin(&mut stdin, &mut reader, &workspace);
    let res = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({}));
    assert_eq!(student_nims(&res), vec!["230101", "230102", "230103", "220204"]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn mutations_survive_a_process_restart() {
    let workspace = temp_dir("siakad-seed-durable");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_as_admin(&mut stdin, &mut reader, &workspace);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.create",
        json!({ "nim": "245501", "nama": "Pindahan", "jurusan": "TI", "sks": 6 }),
    );
    drop(stdin);
    let _ = child.wait();

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_as_admin(&mut stdin, &mut reader, &workspace);
    let res = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({}));
    assert!(student_nims(&res).contains(&"245501".to_string()));

    drop(stdin);
    let _ = child.wait();
}
