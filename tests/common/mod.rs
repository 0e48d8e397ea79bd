//! Binary fixture builders shared by the integration tests.
//!
//! These write the same layouts the parsers read: a FLVER2 file (header,
//! dummy/material/bone/mesh tables, side data, ASCII string table) and a
//! little-endian BND4 archive. Fixtures always use ASCII names.

#![allow(dead_code)] // not every test file uses every builder

const HEADER_SIZE: usize = 0x80;
const DUMMY_SIZE: usize = 0x40;
const MATERIAL_SIZE: usize = 0x20;
const BONE_SIZE: usize = 0x68;
const MESH_SIZE: usize = 0x30;

const BND4_HEADER_SIZE: usize = 0x40;
const BND4_ENTRY_SIZE: usize = 0x24;

#[derive(Debug, Clone)]
pub struct DummyFixture {
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub upward: [f32; 3],
    pub color: [u8; 4],
    pub reference_id: i16,
    pub parent_bone_index: i16,
    pub attach_bone_index: i16,
    pub flag1: bool,
}

impl Default for DummyFixture {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            forward: [0.0, 0.0, 1.0],
            upward: [0.0, 1.0, 0.0],
            color: [255, 255, 255, 255],
            reference_id: 100,
            parent_bone_index: -1,
            attach_bone_index: -1,
            flag1: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterialFixture {
    pub name: String,
    pub mtd: String,
    pub flags: u32,
    pub texture_count: u32,
}

impl MaterialFixture {
    pub fn new(name: &str, mtd: &str) -> Self {
        Self {
            name: name.to_owned(),
            mtd: mtd.to_owned(),
            flags: 0,
            texture_count: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoneFixture {
    pub name: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub parent_index: i16,
    pub child_index: i16,
}

impl BoneFixture {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            parent_index: -1,
            child_index: -1,
        }
    }

    pub fn translated(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshFixture {
    pub dynamic: bool,
    pub material_index: i32,
    pub default_bone_index: i32,
    pub bone_indices: Vec<i32>,
    pub bounding_box: Option<([f32; 3], [f32; 3])>,
    pub face_set_count: u32,
    pub vertex_buffer_count: u32,
}

/// Writable FLVER2 model description.
#[derive(Debug, Clone)]
pub struct FlverFixture {
    pub version: u32,
    pub bounding_box: ([f32; 3], [f32; 3]),
    pub true_face_count: u32,
    pub total_face_count: u32,
    pub dummies: Vec<DummyFixture>,
    pub materials: Vec<MaterialFixture>,
    pub bones: Vec<BoneFixture>,
    pub meshes: Vec<MeshFixture>,
}

impl Default for FlverFixture {
    fn default() -> Self {
        Self {
            version: 0x2_0014,
            bounding_box: ([-1.0; 3], [1.0; 3]),
            true_face_count: 0,
            total_face_count: 0,
            dummies: Vec::new(),
            materials: Vec::new(),
            bones: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

impl FlverFixture {
    pub fn build(&self) -> Vec<u8> {
        // Section layout mirrors the reader: tables in order after the
        // header, then per-mesh side data, then the string table.
        let dummy_table = HEADER_SIZE;
        let material_table = dummy_table + self.dummies.len() * DUMMY_SIZE;
        let bone_table = material_table + self.materials.len() * MATERIAL_SIZE;
        let mesh_table = bone_table + self.bones.len() * BONE_SIZE;
        let mut side = mesh_table + self.meshes.len() * MESH_SIZE;

        let mut mesh_offsets = Vec::new();
        for mesh in &self.meshes {
            let bbox_offset = if mesh.bounding_box.is_some() {
                let at = side;
                side += 24;
                at
            } else {
                0
            };
            let indices_offset = if mesh.bone_indices.is_empty() {
                0
            } else {
                let at = side;
                side += 4 * mesh.bone_indices.len();
                at
            };
            mesh_offsets.push((bbox_offset, indices_offset));
        }

        let string_base = side;
        let mut strings: Vec<u8> = Vec::new();
        let mut intern = |s: &str| {
            let at = string_base + strings.len();
            strings.extend_from_slice(s.as_bytes());
            strings.push(0);
            at as u32
        };
        let material_names: Vec<(u32, u32)> = self
            .materials
            .iter()
            .map(|m| (intern(&m.name), intern(&m.mtd)))
            .collect();
        let bone_names: Vec<u32> = self.bones.iter().map(|b| intern(&b.name)).collect();

        let mut b = Vec::with_capacity(string_base + strings.len());

        // header
        b.extend_from_slice(b"FLVER\0");
        b.extend_from_slice(b"L\0");
        push_u32(&mut b, self.version);
        push_u32(&mut b, HEADER_SIZE as u32); // data offset
        push_u32(&mut b, (string_base + strings.len() - HEADER_SIZE) as u32); // data length
        push_u32(&mut b, self.dummies.len() as u32);
        push_u32(&mut b, self.materials.len() as u32);
        push_u32(&mut b, self.bones.len() as u32);
        push_u32(&mut b, self.meshes.len() as u32);
        push_u32(&mut b, 0); // vertex buffer count
        push_vec3(&mut b, self.bounding_box.0);
        push_vec3(&mut b, self.bounding_box.1);
        push_u32(&mut b, self.true_face_count);
        push_u32(&mut b, self.total_face_count);
        b.push(16); // vertex index size
        b.push(0); // ascii names
        b.extend_from_slice(&[0; 2]);
        b.extend_from_slice(&[0; 4]);
        push_u32(&mut b, 0); // face set count
        push_u32(&mut b, 0); // buffer layout count
        push_u32(&mut b, 0); // texture count
        b.resize(HEADER_SIZE, 0);

        for dummy in &self.dummies {
            push_vec3(&mut b, dummy.position);
            b.extend_from_slice(&dummy.color);
            push_vec3(&mut b, dummy.forward);
            push_i16(&mut b, dummy.reference_id);
            push_i16(&mut b, dummy.parent_bone_index);
            push_vec3(&mut b, dummy.upward);
            push_i16(&mut b, dummy.attach_bone_index);
            b.push(u8::from(dummy.flag1));
            b.push(0); // use upward vector
            push_i32(&mut b, 0); // unk30
            push_i32(&mut b, 0); // unk34
            b.extend_from_slice(&[0; 8]);
        }

        for (material, &(name_offset, mtd_offset)) in self.materials.iter().zip(&material_names) {
            push_u32(&mut b, name_offset);
            push_u32(&mut b, mtd_offset);
            push_u32(&mut b, material.texture_count);
            push_u32(&mut b, 0); // texture index
            push_u32(&mut b, material.flags);
            push_u32(&mut b, 0); // gx offset
            push_i32(&mut b, 0); // unk18
            push_u32(&mut b, 0);
        }

        for (bone, &name_offset) in self.bones.iter().zip(&bone_names) {
            push_vec3(&mut b, bone.translation);
            push_u32(&mut b, name_offset);
            push_vec3(&mut b, bone.rotation);
            push_i16(&mut b, bone.parent_index);
            push_i16(&mut b, bone.child_index);
            push_vec3(&mut b, bone.scale);
            push_i16(&mut b, -1); // next sibling
            push_i16(&mut b, -1); // previous sibling
            push_vec3(&mut b, [0.0; 3]); // bounding box min
            push_u32(&mut b, 0); // unk3C
            push_vec3(&mut b, [0.0; 3]); // bounding box max
            b.extend_from_slice(&[0; 0x1C]);
        }

        for (mesh, &(bbox_offset, indices_offset)) in self.meshes.iter().zip(&mesh_offsets) {
            b.push(u8::from(mesh.dynamic));
            b.extend_from_slice(&[0; 3]);
            push_i32(&mut b, mesh.material_index);
            b.extend_from_slice(&[0; 8]);
            push_i32(&mut b, mesh.default_bone_index);
            push_u32(&mut b, mesh.bone_indices.len() as u32);
            push_u32(&mut b, bbox_offset as u32);
            push_u32(&mut b, indices_offset as u32);
            push_u32(&mut b, mesh.face_set_count);
            push_u32(&mut b, 0); // face set indices offset
            push_u32(&mut b, mesh.vertex_buffer_count);
            push_u32(&mut b, 0); // vertex buffer indices offset
        }

        // per-mesh side data, in the same order the offsets were assigned
        for mesh in &self.meshes {
            if let Some((min, max)) = mesh.bounding_box {
                push_vec3(&mut b, min);
                push_vec3(&mut b, max);
            }
            for index in &mesh.bone_indices {
                push_i32(&mut b, *index);
            }
        }

        b.extend_from_slice(&strings);
        b
    }
}

/// Little-endian BND4 archive with ASCII entry names.
pub fn bnd4_fixture(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let name_base = BND4_HEADER_SIZE + entries.len() * BND4_ENTRY_SIZE;
    let mut name_offsets = Vec::new();
    let mut names: Vec<u8> = Vec::new();
    for (name, _) in entries {
        name_offsets.push((name_base + names.len()) as u32);
        names.extend_from_slice(name.as_bytes());
        names.push(0);
    }

    let data_base = name_base + names.len();
    let mut data_offsets = Vec::new();
    let mut at = data_base;
    for (_, bytes) in entries {
        data_offsets.push(at as u32);
        at += bytes.len();
    }

    let mut b = Vec::with_capacity(at);
    b.extend_from_slice(b"BND4");
    b.extend_from_slice(&[0, 0]); // unk04, unk05
    b.extend_from_slice(&[0; 3]);
    b.push(0); // little endian
    b.extend_from_slice(&[0; 2]);
    push_u32(&mut b, entries.len() as u32);
    push_u64(&mut b, BND4_HEADER_SIZE as u64);
    b.extend_from_slice(b"14B24G18");
    push_u64(&mut b, BND4_ENTRY_SIZE as u64);
    push_u64(&mut b, data_base as u64); // headers end
    b.push(0); // ascii names
    b.push(0x74); // format
    b.push(4); // extended
    b.resize(BND4_HEADER_SIZE, 0);

    for (i, (_, bytes)) in entries.iter().enumerate() {
        b.push(0x40); // raw flags
        b.extend_from_slice(&[0; 3]);
        push_i32(&mut b, -1);
        push_u64(&mut b, bytes.len() as u64);
        push_u64(&mut b, bytes.len() as u64);
        push_u32(&mut b, data_offsets[i]);
        push_i32(&mut b, i as i32);
        push_u32(&mut b, name_offsets[i]);
    }

    b.extend_from_slice(&names);
    for (_, bytes) in entries {
        b.extend_from_slice(bytes);
    }
    b
}

fn push_u32(b: &mut Vec<u8>, v: u32) {
    b.extend_from_slice(&v.to_le_bytes());
}

fn push_i32(b: &mut Vec<u8>, v: i32) {
    b.extend_from_slice(&v.to_le_bytes());
}

fn push_i16(b: &mut Vec<u8>, v: i16) {
    b.extend_from_slice(&v.to_le_bytes());
}

fn push_u64(b: &mut Vec<u8>, v: u64) {
    b.extend_from_slice(&v.to_le_bytes());
}

fn push_vec3(b: &mut Vec<u8>, v: [f32; 3]) {
    for component in v {
        b.extend_from_slice(&component.to_le_bytes());
    }
}
