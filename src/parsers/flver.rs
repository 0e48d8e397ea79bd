//! FLVER2 model parser.
//!
//! Lowers the binary model into a [`Value`] graph: header, dummy points,
//! materials, bones and the mesh table. Vertex buffers, face sets and buffer
//! layouts are not decoded; their table counts are carried on the graph so
//! a divergence still surfaces, but per-vertex data stays out of reports.
//!
//! File offsets are resolved during parsing (name offsets become names,
//! bounding-box offsets become boxes) and never appear in the graph: two
//! models that differ only in section layout compare as equal.

use crate::error::{FlverDiffError, ParseErrorKind, Result};
use crate::model::{InlineStruct, Object, ObjectRef, Value};

use super::reader::{ByteReader, ReadResult};

pub(crate) const FLVER_MAGIC: &[u8] = b"FLVER\0";

const HEADER_SIZE: usize = 0x80;
const DUMMY_SIZE: usize = 0x40;
const MATERIAL_SIZE: usize = 0x20;
const BONE_SIZE: usize = 0x68;
const MESH_SIZE: usize = 0x30;

/// Parse a standalone FLVER2 model into a graph rooted at a `Flver` object.
pub fn parse_flver(bytes: &[u8]) -> Result<Value> {
    let mut r = ByteReader::new(bytes);

    let header =
        read_header(&mut r).map_err(|e| FlverDiffError::parse("FLVER header", e))?;
    tracing::debug!(
        "parsed FLVER header: version {:#x}, {} dummies, {} materials, {} bones, {} meshes",
        header.version,
        header.dummy_count,
        header.material_count,
        header.bone_count,
        header.mesh_count
    );

    r.seek(HEADER_SIZE)
        .map_err(|e| FlverDiffError::parse("FLVER data section", e))?;

    let dummies = read_table(&mut r, header.dummy_count, |r| read_dummy(r))
        .map_err(|e| FlverDiffError::parse("FLVER dummy table", e))?;
    let materials = read_table(&mut r, header.material_count, |r| read_material(r, &header))
        .map_err(|e| FlverDiffError::parse("FLVER material table", e))?;
    let bones = read_table(&mut r, header.bone_count, |r| read_bone(r, &header))
        .map_err(|e| FlverDiffError::parse("FLVER bone table", e))?;
    let meshes = read_table(&mut r, header.mesh_count, |r| read_mesh(r))
        .map_err(|e| FlverDiffError::parse("FLVER mesh table", e))?;

    let root = Object::builder("Flver")
        .property("Header", header.into_object())
        .property("Dummies", Value::Sequence(dummies))
        .property("Materials", Value::Sequence(materials))
        .property("Bones", Value::Sequence(bones))
        .property("Meshes", Value::Sequence(meshes))
        .build();
    Ok(Value::Object(root))
}

#[derive(Debug)]
struct Header {
    big_endian: bool,
    version: u32,
    dummy_count: u32,
    material_count: u32,
    bone_count: u32,
    mesh_count: u32,
    vertex_buffer_count: u32,
    bounding_box_min: InlineStruct,
    bounding_box_max: InlineStruct,
    true_face_count: u32,
    total_face_count: u32,
    vertex_index_size: u8,
    unicode: bool,
    face_set_count: u32,
    buffer_layout_count: u32,
    texture_count: u32,
}

impl Header {
    fn into_object(self) -> ObjectRef {
        Object::builder("FlverHeader")
            .property("BigEndian", self.big_endian)
            .property("Version", self.version)
            .property("Unicode", self.unicode)
            .property("BoundingBoxMin", self.bounding_box_min)
            .property("BoundingBoxMax", self.bounding_box_max)
            .property("TrueFaceCount", self.true_face_count)
            .property("TotalFaceCount", self.total_face_count)
            .property("VertexIndexSize", u64::from(self.vertex_index_size))
            .property("VertexBufferCount", self.vertex_buffer_count)
            .property("FaceSetCount", self.face_set_count)
            .property("BufferLayoutCount", self.buffer_layout_count)
            .property("TextureCount", self.texture_count)
            .build()
    }
}

fn read_header(r: &mut ByteReader) -> ReadResult<Header> {
    r.assert_magic(FLVER_MAGIC)?;

    let endian = r.read_bytes(2)?;
    let big_endian = endian == b"B\0";
    r.set_big_endian(big_endian);

    let version = r.read_u32()?;
    // FLVER0 and anything older use a different layout entirely.
    if version < 0x2_0000 {
        return Err(ParseErrorKind::UnsupportedVersion { version });
    }

    let _data_offset = r.read_u32()?;
    let _data_length = r.read_u32()?;
    let dummy_count = r.read_u32()?;
    let material_count = r.read_u32()?;
    let bone_count = r.read_u32()?;
    let mesh_count = r.read_u32()?;
    let vertex_buffer_count = r.read_u32()?;
    let bounding_box_min = read_vector3(r)?;
    let bounding_box_max = read_vector3(r)?;
    let true_face_count = r.read_u32()?;
    let total_face_count = r.read_u32()?;
    let vertex_index_size = r.read_u8()?;
    let unicode = r.read_bool()?;
    r.skip(2)?;
    r.skip(4)?;
    let face_set_count = r.read_u32()?;
    let buffer_layout_count = r.read_u32()?;
    let texture_count = r.read_u32()?;

    check_table(r, "DummyCount", dummy_count, DUMMY_SIZE)?;
    check_table(r, "MaterialCount", material_count, MATERIAL_SIZE)?;
    check_table(r, "BoneCount", bone_count, BONE_SIZE)?;
    check_table(r, "MeshCount", mesh_count, MESH_SIZE)?;

    Ok(Header {
        big_endian,
        version,
        dummy_count,
        material_count,
        bone_count,
        mesh_count,
        vertex_buffer_count,
        bounding_box_min,
        bounding_box_max,
        true_face_count,
        total_face_count,
        vertex_index_size,
        unicode,
        face_set_count,
        buffer_layout_count,
        texture_count,
    })
}

/// Reject table counts that cannot possibly fit in the file before
/// allocating for them.
fn check_table(r: &ByteReader, field: &str, count: u32, entry_size: usize) -> ReadResult<()> {
    match (count as usize).checked_mul(entry_size) {
        Some(total) if total <= r.len() => Ok(()),
        _ => Err(ParseErrorKind::InvalidValue {
            field: field.to_owned(),
            message: format!("table of {count} entries exceeds file size"),
        }),
    }
}

fn read_table<F>(r: &mut ByteReader, count: u32, mut read_entry: F) -> ReadResult<Vec<Value>>
where
    F: FnMut(&mut ByteReader) -> ReadResult<ObjectRef>,
{
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(Value::Object(read_entry(r)?));
    }
    Ok(entries)
}

fn read_vector3(r: &mut ByteReader) -> ReadResult<InlineStruct> {
    let x = r.read_f32()?;
    let y = r.read_f32()?;
    let z = r.read_f32()?;
    Ok(InlineStruct::vector3(x, y, z))
}

fn read_dummy(r: &mut ByteReader) -> ReadResult<ObjectRef> {
    let position = read_vector3(r)?;
    let color = {
        // Channel order varies by game; kept in file order.
        let b = r.read_bytes(4)?;
        InlineStruct::color_rgba(b[0], b[1], b[2], b[3])
    };
    let forward = read_vector3(r)?;
    let reference_id = r.read_i16()?;
    let parent_bone_index = r.read_i16()?;
    let upward = read_vector3(r)?;
    let attach_bone_index = r.read_i16()?;
    let flag1 = r.read_bool()?;
    let use_upward_vector = r.read_bool()?;
    let unk30 = r.read_i32()?;
    let unk34 = r.read_i32()?;
    r.skip(8)?;

    Ok(Object::builder("Dummy")
        .property("Position", position)
        .property("Forward", forward)
        .property("Upward", upward)
        .property("Color", color)
        .property("ReferenceId", reference_id)
        .property("ParentBoneIndex", parent_bone_index)
        .property("AttachBoneIndex", attach_bone_index)
        .property("Flag1", flag1)
        .property("UseUpwardVector", use_upward_vector)
        .field("Unk30", unk30)
        .field("Unk34", unk34)
        .build())
}

fn read_material(r: &mut ByteReader, header: &Header) -> ReadResult<ObjectRef> {
    let name_offset = r.read_u32()?;
    let mtd_offset = r.read_u32()?;
    let texture_count = r.read_u32()?;
    let _texture_index = r.read_u32()?;
    let flags = r.read_u32()?;
    let _gx_offset = r.read_u32()?;
    let unk18 = r.read_i32()?;
    r.skip(4)?;

    let name = read_name(r, header, name_offset)?;
    let mtd = read_name(r, header, mtd_offset)?;

    Ok(Object::builder("Material")
        .property("Name", name)
        .property("Mtd", mtd)
        .property("Flags", flags)
        .property("TextureCount", texture_count)
        .field("Unk18", unk18)
        .build())
}

fn read_bone(r: &mut ByteReader, header: &Header) -> ReadResult<ObjectRef> {
    let translation = read_vector3(r)?;
    let name_offset = r.read_u32()?;
    let rotation = read_vector3(r)?;
    let parent_index = r.read_i16()?;
    let child_index = r.read_i16()?;
    let scale = read_vector3(r)?;
    let next_sibling_index = r.read_i16()?;
    let previous_sibling_index = r.read_i16()?;
    let bounding_box_min = read_vector3(r)?;
    let unk3c = r.read_u32()?;
    let bounding_box_max = read_vector3(r)?;
    r.skip(0x1C)?;

    let name = read_name(r, header, name_offset)?;

    Ok(Object::builder("Bone")
        .property("Name", name)
        .property("Translation", translation)
        .property("Rotation", rotation)
        .property("Scale", scale)
        .property("BoundingBoxMin", bounding_box_min)
        .property("BoundingBoxMax", bounding_box_max)
        .property("ParentIndex", parent_index)
        .property("ChildIndex", child_index)
        .property("NextSiblingIndex", next_sibling_index)
        .property("PreviousSiblingIndex", previous_sibling_index)
        .field("Unk3C", unk3c)
        .build())
}

fn read_mesh(r: &mut ByteReader) -> ReadResult<ObjectRef> {
    let dynamic = r.read_bool()?;
    r.skip(3)?;
    let material_index = r.read_i32()?;
    r.skip(8)?;
    let default_bone_index = r.read_i32()?;
    let bone_count = r.read_u32()?;
    let bounding_box_offset = r.read_u32()?;
    let bone_indices_offset = r.read_u32()?;
    let face_set_count = r.read_u32()?;
    let _face_set_indices_offset = r.read_u32()?;
    let vertex_buffer_count = r.read_u32()?;
    let _vertex_buffer_indices_offset = r.read_u32()?;

    // Side tables live at absolute offsets; read them without disturbing the
    // mesh-table cursor.
    let saved = r.position();

    let (bounding_box_min, bounding_box_max) = if bounding_box_offset == 0 {
        (Value::Null, Value::Null)
    } else {
        r.seek(bounding_box_offset as usize)?;
        let min = read_vector3(r)?;
        let max = read_vector3(r)?;
        (Value::Inline(min), Value::Inline(max))
    };

    let mut bone_indices = Vec::new();
    if bone_count > 0 {
        check_table(r, "Mesh.BoneCount", bone_count, 4)?;
        r.seek(bone_indices_offset as usize)?;
        bone_indices.reserve(bone_count as usize);
        for _ in 0..bone_count {
            bone_indices.push(Value::from(r.read_i32()?));
        }
    }

    r.seek(saved)?;

    Ok(Object::builder("Mesh")
        .property("Dynamic", dynamic)
        .property("MaterialIndex", material_index)
        .property("DefaultBoneIndex", default_bone_index)
        .property("BoneIndices", Value::Sequence(bone_indices))
        .property("BoundingBoxMin", bounding_box_min)
        .property("BoundingBoxMax", bounding_box_max)
        .property("FaceSetCount", face_set_count)
        .property("VertexBufferCount", vertex_buffer_count)
        .build())
}

fn read_name(r: &ByteReader, header: &Header, offset: u32) -> ReadResult<String> {
    if header.unicode {
        r.read_utf16_at(offset as usize)
    } else {
        r.read_cstr_at(offset as usize)
    }
}
