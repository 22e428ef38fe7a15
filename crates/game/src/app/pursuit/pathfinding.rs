#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridCell {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    cell: GridCell,
    h_cost: u32,
    f_cost: u32,
    insertion_order: u64,
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Grid A* over an injected blocked-cell oracle. Diagonal steps are allowed
/// only when both orthogonal cells forming the corner are open, and the
/// search gives up after a fixed expansion budget; an empty path is a valid
/// answer the caller must handle, not an error.
pub(crate) struct PathfindingSystem {
    columns: i32,
    rows: i32,
}

impl PathfindingSystem {
    pub(crate) fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            columns: (world_width / GRID_CELL_SIZE_UNITS).ceil() as i32 + 1,
            rows: (world_height / GRID_CELL_SIZE_UNITS).ceil() as i32 + 1,
        }
    }

    fn cell_of(&self, point: Vec2) -> Option<GridCell> {
        let x = (point.x / GRID_CELL_SIZE_UNITS).floor() as i32;
        let y = (point.y / GRID_CELL_SIZE_UNITS).floor() as i32;
        if x < 0 || y < 0 || x >= self.columns || y >= self.rows {
            return None;
        }
        Some(GridCell { x, y })
    }

    fn cell_center_world(cell: GridCell) -> Vec2 {
        Vec2 {
            x: (cell.x as f32 + 0.5) * GRID_CELL_SIZE_UNITS,
            y: (cell.y as f32 + 0.5) * GRID_CELL_SIZE_UNITS,
        }
    }

    fn index_of(&self, cell: GridCell) -> usize {
        cell.y as usize * self.columns as usize + cell.x as usize
    }

    fn in_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.columns && y < self.rows
    }

    pub(crate) fn find_path<F>(&self, is_blocked: F, start: Vec2, goal: Vec2) -> Vec<Vec2>
    where
        F: Fn(i32, i32) -> bool,
    {
        let Some(start_cell) = self.cell_of(start) else {
            return Vec::new();
        };
        let Some(goal_cell) = self.cell_of(goal) else {
            return Vec::new();
        };
        if is_blocked(start_cell.x, start_cell.y) || is_blocked(goal_cell.x, goal_cell.y) {
            return Vec::new();
        }
        if start_cell == goal_cell {
            return vec![Self::cell_center_world(goal_cell)];
        }

        let node_count = self.columns as usize * self.rows as usize;
        let mut closed = vec![false; node_count];
        let mut best_g = vec![u32::MAX; node_count];
        let mut parent = vec![None::<usize>; node_count];
        let mut open = Vec::new();
        let mut next_insertion = 0u64;
        let mut expansions = 0usize;

        let start_h = grid_heuristic(start_cell, goal_cell);
        open.push(OpenNode {
            cell: start_cell,
            h_cost: start_h,
            f_cost: start_h,
            insertion_order: next_insertion,
        });
        next_insertion = next_insertion.saturating_add(1);
        best_g[self.index_of(start_cell)] = 0;

        while !open.is_empty() {
            let best_index = pick_best_open_node_index(&open);
            let current = open.swap_remove(best_index);
            let current_index = self.index_of(current.cell);
            if closed[current_index] {
                continue;
            }
            closed[current_index] = true;

            if current.cell == goal_cell {
                return self.reconstruct_world_path(&parent, start_cell, goal_cell);
            }

            expansions += 1;
            if expansions >= MAX_SEARCH_ITERATIONS {
                return Vec::new();
            }

            let current_g = best_g[current_index];
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let neighbor_x = current.cell.x + dx;
                let neighbor_y = current.cell.y + dy;
                if !self.in_grid(neighbor_x, neighbor_y) {
                    continue;
                }
                if is_blocked(neighbor_x, neighbor_y) {
                    continue;
                }
                let diagonal = dx != 0 && dy != 0;
                if diagonal {
                    // No corner cutting: both orthogonal cells forming the
                    // corner must be open.
                    if is_blocked(current.cell.x + dx, current.cell.y)
                        || is_blocked(current.cell.x, current.cell.y + dy)
                    {
                        continue;
                    }
                }
                let neighbor = GridCell {
                    x: neighbor_x,
                    y: neighbor_y,
                };
                let neighbor_index = self.index_of(neighbor);
                if closed[neighbor_index] {
                    continue;
                }

                let step_cost = if diagonal {
                    DIAGONAL_STEP_COST
                } else {
                    ORTHOGONAL_STEP_COST
                };
                let tentative_g = current_g.saturating_add(step_cost);
                if tentative_g >= best_g[neighbor_index] {
                    continue;
                }

                best_g[neighbor_index] = tentative_g;
                parent[neighbor_index] = Some(current_index);
                let h_cost = grid_heuristic(neighbor, goal_cell);
                open.push(OpenNode {
                    cell: neighbor,
                    h_cost,
                    f_cost: tentative_g.saturating_add(h_cost),
                    insertion_order: next_insertion,
                });
                next_insertion = next_insertion.saturating_add(1);
            }
        }

        Vec::new()
    }

    fn reconstruct_world_path(
        &self,
        parent: &[Option<usize>],
        start_cell: GridCell,
        goal_cell: GridCell,
    ) -> Vec<Vec2> {
        let start_index = self.index_of(start_cell);
        let mut cursor = self.index_of(goal_cell);
        let mut indices = vec![cursor];
        while cursor != start_index {
            let Some(next) = parent.get(cursor).and_then(|value| *value) else {
                return Vec::new();
            };
            cursor = next;
            indices.push(cursor);
        }
        indices.reverse();
        indices
            .into_iter()
            .map(|index| {
                Self::cell_center_world(GridCell {
                    x: (index % self.columns as usize) as i32,
                    y: (index / self.columns as usize) as i32,
                })
            })
            .collect()
    }
}

fn grid_heuristic(a: GridCell, b: GridCell) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    dx.saturating_add(dy).saturating_mul(ORTHOGONAL_STEP_COST)
}

fn pick_best_open_node_index(open: &[OpenNode]) -> usize {
    let mut best_index = 0usize;
    for index in 1..open.len() {
        let current = open[index];
        let best = open[best_index];
        if open_node_order_key(current) < open_node_order_key(best) {
            best_index = index;
        }
    }
    best_index
}

fn open_node_order_key(node: OpenNode) -> (u32, u32, i32, i32, u64) {
    (
        node.f_cost,
        node.h_cost,
        node.cell.y,
        node.cell.x,
        node.insertion_order,
    )
}

/// Drops interior waypoints that continue the previous direction, leaving
/// only the corners of the route.
pub(crate) fn simplify_path(path: &[Vec2]) -> Vec<Vec2> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut simplified = vec![path[0]];
    for window in path.windows(3) {
        let [previous, current, next] = [window[0], window[1], window[2]];
        let incoming = Vec2 {
            x: current.x - previous.x,
            y: current.y - previous.y,
        };
        let outgoing = Vec2 {
            x: next.x - current.x,
            y: next.y - current.y,
        };
        let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
        if cross != 0.0 {
            simplified.push(current);
        }
    }
    simplified.push(path[path.len() - 1]);
    simplified
}
