use serde::{Deserialize, Serialize};

/// Credit-hour (sks) caps. The UI used to enforce these only as a display
/// hint; here they are hard invariants checked before every write.
pub const MAX_LECTURER_SKS: u32 = 12;
pub const MAX_STUDENT_SKS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: String,
    pub nip: String,
    pub nama: String,
    pub status: bool,
    pub sks: u32,
}

/// Lecturer draft as submitted by a form: the entity minus the generated id.
#[derive(Debug, Clone, Deserialize)]
pub struct LecturerDraft {
    pub nip: String,
    pub nama: String,
    #[serde(default = "default_active")]
    pub status: bool,
    #[serde(default)]
    pub sks: u32,
}

/// Students carry no generated id; the nim is the primary identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub nim: String,
    pub nama: String,
    pub jurusan: String,
    pub status: bool,
    pub sks: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentDraft {
    pub nim: String,
    pub nama: String,
    pub jurusan: String,
    #[serde(default = "default_active")]
    pub status: bool,
    #[serde(default)]
    pub sks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    #[serde(rename = "namaKelas")]
    pub nama_kelas: String,
    #[serde(rename = "mataKuliah")]
    pub mata_kuliah: String,
    /// Lecturer reference by opaque id. Resolution to a display name happens
    /// at read time and tolerates dangling ids.
    #[serde(rename = "dosenId")]
    pub dosen_id: String,
    /// Member student nims, insertion order preserved.
    #[serde(default)]
    pub mahasiswa: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassDraft {
    #[serde(rename = "namaKelas")]
    pub nama_kelas: String,
    #[serde(rename = "mataKuliah")]
    pub mata_kuliah: String,
    #[serde(rename = "dosenId")]
    pub dosen_id: String,
    #[serde(default)]
    pub mahasiswa: Vec<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dosen,
    Mahasiswa,
}

/// The active session, persisted under the `user` key and passed explicitly
/// into the authorization gate. Never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(rename = "loggedInAt")]
    pub logged_in_at: String,
}
