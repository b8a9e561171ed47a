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

fn request(
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
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn request_err_code(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> String {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(false),
        "{} unexpectedly succeeded: {}",
        method,
        value
    );
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .expect("error code")
        .to_string()
}

fn select_workspace(
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
}

#[test]
fn dosen_may_mutate_students_and_classes_but_not_lecturers() {
    let workspace = temp_dir("siakad-auth-dosen");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "session.login",
        json!({ "role": "dosen", "nama": "Siti Rahmawati, M.Kom." }),
    );

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "1",
        "lecturers.create",
        json!({ "nip": "777", "nama": "Dr. Baru", "sks": 2 }),
    );
    assert_eq!(code, "forbidden");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.create",
        json!({ "nim": "881122", "nama": "Dari Dosen", "jurusan": "SI", "sks": 3 }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "classes.create",
        json!({ "namaKelas": "SI-5C", "mataKuliah": "Etika Profesi", "dosenId": "dsn-0002", "mahasiswa": [] }),
    );

    // Reads stay open.
    let _ = request_ok(&mut stdin, &mut reader, "4", "lecturers.list", json!({}));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn mahasiswa_is_read_only_and_sees_its_own_record_flagged() {
    let workspace = temp_dir("siakad-auth-mhs");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "session.login",
        json!({ "role": "mahasiswa", "nim": "230102", "nama": "Dewi Lestari" }),
    );

    for (id, method, params) in [
        (
            "1",
            "students.create",
            json!({ "nim": "1", "nama": "X", "jurusan": "TI" }),
        ),
        (
            "2",
            "students.delete",
            json!({ "nim": "230101" }),
        ),
        (
            "3",
            "classes.create",
            json!({ "namaKelas": "X", "mataKuliah": "Y", "dosenId": "z" }),
        ),
        (
            "4",
            "lecturers.delete",
            json!({ "id": "dsn-0001" }),
        ),
    ] {
        let code = request_err_code(&mut stdin, &mut reader, id, method, params);
        assert_eq!(code, "forbidden", "method {} must be forbidden", method);
    }

    let res = request_ok(&mut stdin, &mut reader, "5", "students.list", json!({}));
    let rows = res
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students");
    for row in rows {
        let nim = row.get("nim").and_then(|v| v.as_str());
        let is_self = row.get("isSelf").and_then(|v| v.as_bool());
        assert_eq!(is_self, Some(nim == Some("230102")));
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn logout_closes_the_gate_again() {
    let workspace = temp_dir("siakad-auth-logout");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "session.login",
        json!({ "role": "admin" }),
    );
    let _ = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({}));

    let _ = request_ok(&mut stdin, &mut reader, "2", "session.logout", json!({}));
    let code = request_err_code(&mut stdin, &mut reader, "3", "students.list", json!({}));
    assert_eq!(code, "unauthenticated");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn session_is_restored_when_the_workspace_is_reopened() {
    let workspace = temp_dir("siakad-auth-restore");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "session.login",
        json!({ "role": "dosen" }),
    );
    drop(stdin);
    let _ = child.wait();

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let res = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        res.get("session")
            .and_then(|s| s.get("role"))
            .and_then(|v| v.as_str()),
        Some("dosen")
    );
    // No fresh login needed; the restored session opens reads.
    let _ = request_ok(&mut stdin, &mut reader, "1", "classes.list", json!({}));

    drop(stdin);
    let _ = child.wait();
}
