//! Permissive OBJ parser supporting positions, normals, texture coordinates
//! and polygonal faces.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use meshcore::{LoadError, LoadResult};

use crate::mesh::{Face, Normal, ObjMesh, Position, TexCoord, VertexRef};

/// Face tokens shorter than this are dropped without error.
const MIN_FACE_TOKEN_LEN: usize = 3;

/// Line prefixes the parser acts on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Directive {
    Position,
    TexCoord,
    Normal,
    Face,
    Unrecognized,
}

impl Directive {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "v" => Directive::Position,
            "vt" => Directive::TexCoord,
            "vn" => Directive::Normal,
            "f" => Directive::Face,
            _ => Directive::Unrecognized,
        }
    }
}

/// Line being parsed, for error reporting.
struct LineCtx<'a> {
    line_no: usize,
    line: &'a str,
}

impl LineCtx<'_> {
    fn error(&self, reason: impl Into<String>) -> LoadError {
        LoadError::parse(self.line_no, self.line, reason)
    }
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> LoadResult<ObjMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(BufReader::new(file))?;
    log::info!(
        "Loaded OBJ {:?}: {} positions, {} texcoords, {} normals, {} faces",
        path,
        mesh.positions().len(),
        mesh.texcoords().len(),
        mesh.normals().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> LoadResult<ObjMesh> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> LoadResult<ObjMesh> {
    parse_obj(io::Cursor::new(contents))
}

/// Single pass over the input. Face indices are stored unresolved.
pub fn parse_obj<R: BufRead>(reader: R) -> LoadResult<ObjMesh> {
    let mut positions: Vec<Position> = Vec::new();
    let mut texcoords: Vec<TexCoord> = Vec::new();
    let mut normals: Vec<Normal> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();
    let mut ignored = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Io { line_no, source })?;
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Split the raw line: an indented or tab-separated directive does
        // not match any known prefix.
        let Some((prefix, rest)) = line.split_once(' ') else {
            log::trace!("Line {line_no} has no arguments, skipping: '{line}'");
            ignored += 1;
            continue;
        };

        let ctx = LineCtx {
            line_no,
            line: &line,
        };
        match Directive::from_prefix(prefix) {
            Directive::Position => positions.push(parse_position(rest, &ctx)?),
            Directive::TexCoord => texcoords.push(parse_texcoord(rest, &ctx)?),
            Directive::Normal => normals.push(parse_normal(rest, &ctx)?),
            Directive::Face => faces.push(parse_face(rest, &ctx)?),
            Directive::Unrecognized => {
                // o/g/s/usemtl/mtllib and friends
                log::trace!("Ignoring '{prefix}' directive on line {line_no}");
                ignored += 1;
            }
        }
    }

    log::debug!(
        "Parsed OBJ: {} positions, {} texcoords, {} normals, {} faces, {} lines ignored",
        positions.len(),
        texcoords.len(),
        normals.len(),
        faces.len(),
        ignored
    );

    Ok(ObjMesh::from_parts(positions, texcoords, normals, faces))
}

/// Parse every space-separated number, keeping the first `N`.
/// Returns the values and the total count seen. An empty token (double or
/// trailing space) is not a number.
fn parse_components<const N: usize>(rest: &str, ctx: &LineCtx<'_>) -> LoadResult<([f32; N], usize)> {
    let mut values = [0.0f32; N];
    let mut count = 0;
    for token in rest.split(' ') {
        let value = token
            .parse::<f32>()
            .map_err(|e| ctx.error(format!("invalid number '{token}': {e}")))?;
        if count < N {
            values[count] = value;
        }
        count += 1;
    }
    Ok((values, count))
}

fn parse_position(rest: &str, ctx: &LineCtx<'_>) -> LoadResult<Position> {
    let (c, count) = parse_components::<4>(rest, ctx)?;
    if count < 3 {
        return Err(ctx.error(format!("position needs 3 components, found {count}")));
    }
    let w = if count >= 4 { c[3] } else { 1.0 };
    Ok(Position {
        xyz: [c[0], c[1], c[2]],
        w,
    })
}

fn parse_texcoord(rest: &str, ctx: &LineCtx<'_>) -> LoadResult<TexCoord> {
    // Missing v/w stay 0.0.
    let (c, count) = parse_components::<3>(rest, ctx)?;
    if count == 0 {
        return Err(ctx.error("texture coordinate has no components"));
    }
    Ok(TexCoord(c))
}

fn parse_normal(rest: &str, ctx: &LineCtx<'_>) -> LoadResult<Normal> {
    let (c, count) = parse_components::<3>(rest, ctx)?;
    if count < 3 {
        return Err(ctx.error(format!("normal needs 3 components, found {count}")));
    }
    Ok(Normal(c))
}

fn parse_face(rest: &str, ctx: &LineCtx<'_>) -> LoadResult<Face> {
    let mut refs = Vec::new();
    // Empty tokens from repeated spaces fall under the length rule.
    for token in rest.split(' ') {
        if token.chars().count() < MIN_FACE_TOKEN_LEN {
            log::trace!("Dropping short face token '{token}' on line {}", ctx.line_no);
            continue;
        }
        refs.push(parse_vertex_ref(token, ctx)?);
    }

    if refs.len() < 3 {
        log::debug!(
            "Face on line {} has {} usable vertices; it yields no triangles",
            ctx.line_no,
            refs.len()
        );
    }
    Ok(Face { refs })
}

fn parse_vertex_ref(token: &str, ctx: &LineCtx<'_>) -> LoadResult<VertexRef> {
    let mut split = token.split('/');
    let position = match split.next() {
        Some(value) if !value.is_empty() => parse_index(value, token, ctx)?,
        _ => return Err(ctx.error(format!("face element '{token}' has no position index"))),
    };
    let texcoord = parse_optional_index(split.next(), token, ctx)?;
    let normal = parse_optional_index(split.next(), token, ctx)?;
    if split.next().is_some() {
        return Err(ctx.error(format!("face element '{token}' has more than 3 components")));
    }
    Ok(VertexRef::new(position, texcoord, normal))
}

fn parse_optional_index(value: Option<&str>, token: &str, ctx: &LineCtx<'_>) -> LoadResult<Option<i64>> {
    match value {
        Some(value) if !value.is_empty() => parse_index(value, token, ctx).map(Some),
        _ => Ok(None),
    }
}

fn parse_index(value: &str, token: &str, ctx: &LineCtx<'_>) -> LoadResult<i64> {
    value
        .parse::<i64>()
        .map_err(|e| ctx.error(format!("invalid index '{value}' in face element '{token}': {e}")))
}
