use serde_json::{json, Value};

use crate::store::{COLL_CLASSES, COLL_LECTURERS, COLL_STUDENTS};

/// Bundled default datasets, persisted on first access to a collection that
/// is absent or fails to parse as an array. Ids here are fixed so seeding is
/// deterministic across workspaces.
pub fn default_collection(name: &str) -> Value {
    match name {
        COLL_LECTURERS => default_lecturers(),
        COLL_STUDENTS => default_students(),
        COLL_CLASSES => default_classes(),
        _ => json!([]),
    }
}

fn default_lecturers() -> Value {
    json!([
        {
            "id": "dsn-0001",
            "nip": "197805152005011002",
            "nama": "Dr. Bambang Tri Atmojo",
            "status": true,
            "sks": 9
        },
        {
            "id": "dsn-0002",
            "nip": "198211032010122001",
            "nama": "Siti Rahmawati, M.Kom.",
            "status": true,
            "sks": 6
        },
        {
            "id": "dsn-0003",
            "nip": "196907211998021003",
            "nama": "Prof. Hendra Gunawan",
            "status": false,
            "sks": 0
        }
    ])
}

fn default_students() -> Value {
    json!([
        {
            "nim": "230101",
            "nama": "Aditya Pratama",
            "jurusan": "Teknik Informatika",
            "status": true,
            "sks": 20
        },
        {
            "nim": "230102",
            "nama": "Dewi Lestari",
            "jurusan": "Sistem Informasi",
            "status": true,
            "sks": 22
        },
        {
            "nim": "230103",
            "nama": "Rizky Hidayat",
            "jurusan": "Teknik Informatika",
            "status": true,
            "sks": 18
        },
        {
            "nim": "220204",
            "nama": "Putri Maharani",
            "jurusan": "Manajemen",
            "status": false,
            "sks": 0
        }
    ])
}

fn default_classes() -> Value {
    json!([
        {
            "id": "kls-0001",
            "namaKelas": "IF-3A",
            "mataKuliah": "Struktur Data",
            "dosenId": "dsn-0001",
            "mahasiswa": ["230101", "230103"]
        },
        {
            "id": "kls-0002",
            "namaKelas": "SI-2B",
            "mataKuliah": "Basis Data",
            "dosenId": "dsn-0002",
            "mahasiswa": ["230102"]
        }
    ])
}
