use std::io;

/// Cells per side of the fog-of-war grid.
pub const FOW_GRID_SIDE: usize = 512;
/// Payload bytes before the first cell.
pub const FOW_GRID_OFFSET: usize = 4;
const FOW_CELL_WIDTH: usize = 4;
const FOW_REVEALED: u8 = 0xFF;

/// Marks every cell as explored by setting bytes 1 and 2 of each cell.
pub fn clear_fog(body: &mut [u8]) -> io::Result<()> {
    let end = FOW_GRID_OFFSET + FOW_GRID_SIDE * FOW_GRID_SIDE * FOW_CELL_WIDTH;
    if body.len() < end {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "fog-of-war payload is {} bytes, grid needs {end}",
                body.len()
            ),
        ));
    }

    for cell in body[FOW_GRID_OFFSET..end].chunks_exact_mut(FOW_CELL_WIDTH) {
        cell[1] = FOW_REVEALED;
        cell[2] = FOW_REVEALED;
    }
    Ok(())
}
