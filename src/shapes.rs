// src/shapes.rs
//! Извлечение планарного графа из сетки индексов
//!
//! Граница областей описывается сегментами на решётке углов пикселей:
//! горизонтальный сегмент присутствует между разными областями по
//! вертикали (и всегда на верхней/нижней рамке), вертикальный — между
//! разными областями по горизонтали (и на боковых рамках). Вершины графа —
//! углы, в которых сходится не два сегмента: развилки, тупики. Рёбра —
//! цепочки сегментов между вершинами; пара областей по бокам цепочки
//! постоянна, любой её излом означал бы развилку. Замкнутые контуры без
//! единой вершины (острова) получают искусственную вершину и ребро-петлю
//! `v1 == v2`.
//!
//! Координаты вершин — углы решётки в диапазоне `[0..W] × [0..H]`, в
//! отличие от пиксельных центров сеток.

use crate::grid::IndexGrid;

/// Вершина планарного графа в координатах углов решётки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeVertex {
    pub id: usize,
    pub x: u32,
    pub y: u32,
}

/// Ребро графа; `v1 == v2` для контура-острова
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeEdge {
    pub id: usize,
    pub v1: usize,
    pub v2: usize,
}

/// Рёбра, ограничивающие одну область
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceShape {
    pub id: String,
    pub edges: Vec<usize>,
}

/// Планарный граф разбиения карты
#[derive(Debug, Clone, Default)]
pub struct ShapeData {
    pub vertices: Vec<ShapeVertex>,
    pub edges: Vec<ShapeEdge>,
    pub provinces: Vec<ProvinceShape>,
}

// Направления обхода сегментов от угла: вправо, вниз, влево, вверх.
// Порядок фиксирован — он определяет порядок выделения идентификаторов рёбер.
const RIGHT: u8 = 0;
const DOWN: u8 = 1;
const LEFT: u8 = 2;
const UP: u8 = 3;

struct Tracer<'a> {
    grid: &'a IndexGrid,
    w: i64,
    h: i64,
    hseg: Vec<bool>,      // (h+1) × w
    vseg: Vec<bool>,      // h × (w+1)
    visited_h: Vec<bool>,
    visited_v: Vec<bool>,
    vertex_at: Vec<i64>,  // (h+1) × (w+1), -1 — угол не является вершиной
    vertices: Vec<(i64, i64)>, // (x, y) в порядке выдачи идентификаторов
}

impl<'a> Tracer<'a> {
    fn new(grid: &'a IndexGrid) -> Self {
        let w = grid.width as usize;
        let h = grid.height as usize;

        let mut hseg = vec![false; (h + 1) * w];
        let mut vseg = vec![false; h * (w + 1)];

        // внутренние сегменты — только между разными областями
        for y in 1..h {
            for x in 0..w {
                hseg[y * w + x] = grid.data[(y - 1) * w + x] != grid.data[y * w + x];
            }
        }
        for y in 0..h {
            for x in 1..w {
                vseg[y * (w + 1) + x] = grid.data[y * w + x - 1] != grid.data[y * w + x];
            }
        }
        // рамка присутствует всегда
        for x in 0..w {
            hseg[x] = true;
            hseg[h * w + x] = true;
        }
        for y in 0..h {
            vseg[y * (w + 1)] = true;
            vseg[y * (w + 1) + w] = true;
        }

        Self {
            grid,
            w: w as i64,
            h: h as i64,
            visited_h: vec![false; hseg.len()],
            visited_v: vec![false; vseg.len()],
            hseg,
            vseg,
            vertex_at: vec![-1; (h + 1) * (w + 1)],
            vertices: Vec::new(),
        }
    }

    fn hseg_present(&self, y: i64, x: i64) -> bool {
        y >= 0 && y <= self.h && x >= 0 && x < self.w && self.hseg[(y * self.w + x) as usize]
    }

    fn vseg_present(&self, y: i64, x: i64) -> bool {
        y >= 0 && y < self.h && x >= 0 && x <= self.w && self.vseg[(y * (self.w + 1) + x) as usize]
    }

    /// Есть ли сегмент, выходящий из угла `(y, x)` в данном направлении
    fn seg_in_dir(&self, y: i64, x: i64, dir: u8) -> bool {
        match dir {
            RIGHT => self.hseg_present(y, x),
            DOWN => self.vseg_present(y, x),
            LEFT => self.hseg_present(y, x - 1),
            UP => self.vseg_present(y - 1, x),
            _ => unreachable!(),
        }
    }

    fn visited_in_dir(&self, y: i64, x: i64, dir: u8) -> bool {
        match dir {
            RIGHT => self.visited_h[(y * self.w + x) as usize],
            DOWN => self.visited_v[(y * (self.w + 1) + x) as usize],
            LEFT => self.visited_h[(y * self.w + x - 1) as usize],
            UP => self.visited_v[((y - 1) * (self.w + 1) + x) as usize],
            _ => unreachable!(),
        }
    }

    fn mark_in_dir(&mut self, y: i64, x: i64, dir: u8) {
        match dir {
            RIGHT => self.visited_h[(y * self.w + x) as usize] = true,
            DOWN => self.visited_v[(y * (self.w + 1) + x) as usize] = true,
            LEFT => self.visited_h[(y * self.w + x - 1) as usize] = true,
            UP => self.visited_v[((y - 1) * (self.w + 1) + x) as usize] = true,
            _ => unreachable!(),
        }
    }

    fn degree(&self, y: i64, x: i64) -> u8 {
        (0..4u8).filter(|&d| self.seg_in_dir(y, x, d)).count() as u8
    }

    fn vertex_id(&self, y: i64, x: i64) -> Option<usize> {
        let id = self.vertex_at[(y * (self.w + 1) + x) as usize];
        (id >= 0).then_some(id as usize)
    }

    fn add_vertex(&mut self, y: i64, x: i64) -> usize {
        let id = self.vertices.len();
        self.vertex_at[(y * (self.w + 1) + x) as usize] = id as i64;
        self.vertices.push((x, y));
        id
    }

    /// Значение области в клетке `(y, x)`; за пределами сетки — -1
    fn cell(&self, y: i64, x: i64) -> i32 {
        if y < 0 || y >= self.h || x < 0 || x >= self.w {
            -1
        } else {
            self.grid.data[(y * self.w + x) as usize]
        }
    }

    /// Пара областей по бокам сегмента, выходящего из `(y, x)` в `dir`
    fn flanks(&self, y: i64, x: i64, dir: u8) -> (i32, i32) {
        match dir {
            RIGHT => (self.cell(y - 1, x), self.cell(y, x)),
            DOWN => (self.cell(y, x - 1), self.cell(y, x)),
            LEFT => (self.cell(y - 1, x - 1), self.cell(y, x - 1)),
            UP => (self.cell(y - 1, x - 1), self.cell(y - 1, x)),
            _ => unreachable!(),
        }
    }

    /// Идёт по цепочке сегментов до следующей вершины
    ///
    /// Возвращает конечный угол `(x, y)` и пару областей, определённую по
    /// первому сегменту: вдоль цепочки она не меняется.
    fn trace(&mut self, start_y: i64, start_x: i64, start_dir: u8) -> (i64, i64, i32, i32) {
        let (mut cy, mut cx, mut dir) = (start_y, start_x, start_dir);
        let (p1, p2) = self.flanks(cy, cx, dir);

        loop {
            if self.visited_in_dir(cy, cx, dir) {
                return (cx, cy, p1, p2);
            }
            self.mark_in_dir(cy, cx, dir);

            let (ny, nx) = match dir {
                RIGHT => (cy, cx + 1),
                DOWN => (cy + 1, cx),
                LEFT => (cy, cx - 1),
                UP => (cy - 1, cx),
                _ => unreachable!(),
            };
            if self.vertex_id(ny, nx).is_some() {
                return (nx, ny, p1, p2);
            }

            // промежуточный угол степени 2: единственное продолжение без разворота
            let rev = (dir + 2) % 4;
            let mut advanced = false;
            for d in 0..4u8 {
                if d != rev && self.seg_in_dir(ny, nx, d) {
                    dir = d;
                    cy = ny;
                    cx = nx;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                return (nx, ny, p1, p2);
            }
        }
    }
}

/// Извлекает вершины, рёбра и принадлежность рёбер областям
///
/// `region_ids` — внешние идентификаторы областей в порядке индексов
/// сетки; списки рёбер в ответе идут в том же порядке.
#[must_use]
pub fn extract_shapes(grid: &IndexGrid, region_ids: &[String]) -> ShapeData {
    let mut tracer = Tracer::new(grid);
    let h = tracer.h;
    let w = tracer.w;

    // вершины: углы со степенью, отличной от 2; внутренние углы степени 0
    // остаются изолированными вершинами без рёбер
    for y in 0..=h {
        for x in 0..=w {
            if tracer.degree(y, x) != 2 {
                tracer.add_vertex(y, x);
            }
        }
    }

    let mut edges: Vec<ShapeEdge> = Vec::new();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); region_ids.len()];
    let attach = |adjacency: &mut Vec<Vec<usize>>, region: i32, edge_id: usize| {
        if region >= 0 && (region as usize) < adjacency.len() {
            adjacency[region as usize].push(edge_id);
        }
    };

    // обход от каждой вершины по всем непосещённым сегментам
    let seeded = tracer.vertices.len();
    for vid in 0..seeded {
        let (vx, vy) = tracer.vertices[vid];
        for dir in 0..4u8 {
            if !tracer.seg_in_dir(vy, vx, dir) || tracer.visited_in_dir(vy, vx, dir) {
                continue;
            }
            let (ex, ey, p1, p2) = tracer.trace(vy, vx, dir);
            let v2 = tracer
                .vertex_id(ey, ex)
                .expect("a traced chain ends at a vertex corner");
            let edge_id = edges.len();
            edges.push(ShapeEdge {
                id: edge_id,
                v1: vid,
                v2,
            });
            attach(&mut adjacency, p1, edge_id);
            attach(&mut adjacency, p2, edge_id);
        }
    }

    // контуры-острова: непосещённые сегменты без единой вершины.
    // Любой контур содержит горизонтальные сегменты, поэтому хватает
    // развёртки по ним.
    for y in 0..=h {
        for x in 0..w {
            if !tracer.hseg_present(y, x) || tracer.visited_in_dir(y, x, RIGHT) {
                continue;
            }
            let vid = tracer
                .vertex_id(y, x)
                .unwrap_or_else(|| tracer.add_vertex(y, x));
            let (_, _, p1, p2) = tracer.trace(y, x, RIGHT);
            let edge_id = edges.len();
            edges.push(ShapeEdge {
                id: edge_id,
                v1: vid,
                v2: vid,
            });
            attach(&mut adjacency, p1, edge_id);
            attach(&mut adjacency, p2, edge_id);
        }
    }

    let vertices = tracer
        .vertices
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| ShapeVertex {
            id,
            x: x as u32,
            y: y as u32,
        })
        .collect();

    let provinces = region_ids
        .iter()
        .zip(adjacency)
        .map(|(id, edges)| ProvinceShape {
            id: id.clone(),
            edges,
        })
        .collect();

    ShapeData {
        vertices,
        edges,
        provinces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn grid_from_rows(rows: &[&[i32]]) -> IndexGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        IndexGrid {
            width,
            height,
            data: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("prv-{i}")).collect()
    }

    /// Вершины, на которые ссылается хотя бы одно ребро
    fn edge_vertices(shapes: &ShapeData) -> HashSet<usize> {
        shapes.edges.iter().flat_map(|e| [e.v1, e.v2]).collect()
    }

    /// Счётчик граней: области с рёбрами плюс внешняя грань
    fn euler_faces(shapes: &ShapeData) -> i64 {
        shapes.provinces.iter().filter(|p| !p.edges.is_empty()).count() as i64 + 1
    }

    #[test]
    fn vertical_split_gives_two_junctions_and_three_edges() {
        // 5×5, столбцы 0–1 — область 0, столбцы 2–4 — область 1
        let row: &[i32] = &[0, 0, 1, 1, 1];
        let grid = grid_from_rows(&[row, row, row, row, row]);
        let shapes = extract_shapes(&grid, &ids(2));

        // развилки шва — (2,0) и (2,5); остальные вершины — изолированные
        // внутренние углы степени 0 (12 штук на решётке 6×6)
        assert_eq!(shapes.vertices.len(), 14);
        let top = shapes
            .vertices
            .iter()
            .find(|v| (v.x, v.y) == (2, 0))
            .unwrap()
            .id;
        let bottom = shapes
            .vertices
            .iter()
            .find(|v| (v.x, v.y) == (2, 5))
            .unwrap()
            .id;

        assert_eq!(shapes.edges.len(), 3);
        for e in &shapes.edges {
            assert_eq!((e.v1, e.v2), (top, bottom));
        }

        // шов общий, рамочные дуги — по одной на область
        assert_eq!(shapes.provinces[0].edges, vec![1, 2]);
        assert_eq!(shapes.provinces[1].edges, vec![0, 1]);

        // Эйлер по компоненте с рёбрами: 2 − 3 + (2 области + внешняя) = 2;
        // изолированные углы — тривиальные компоненты, 1 − 0 + 1 = 2
        let connected = edge_vertices(&shapes);
        assert_eq!(connected, HashSet::from([top, bottom]));
        let (v, e) = (connected.len() as i64, shapes.edges.len() as i64);
        assert_eq!(v - e + euler_faces(&shapes), 2);
    }

    #[test]
    fn constant_grid_keeps_isolated_corners_and_one_loop() {
        let row: &[i32] = &[0, 0, 0];
        let grid = grid_from_rows(&[row, row, row]);
        let shapes = extract_shapes(&grid, &ids(1));

        // четыре внутренних угла степени 0 плюс вершина, продвинутая
        // развёрткой рамочной петли
        assert_eq!(shapes.vertices.len(), 5);
        assert_eq!(shapes.edges.len(), 1);
        assert_eq!(shapes.edges[0].v1, shapes.edges[0].v2);
        assert_eq!(shapes.provinces[0].edges, vec![0]);

        // петля закреплена в углу (0,0), изолированные углы рёбер не несут
        let loop_vertex = &shapes.vertices[shapes.edges[0].v1];
        assert_eq!((loop_vertex.x, loop_vertex.y), (0, 0));

        let connected = edge_vertices(&shapes);
        let (v, e) = (connected.len() as i64, shapes.edges.len() as i64);
        assert_eq!(v - e + euler_faces(&shapes), 2);
    }

    #[test]
    fn an_enclosed_island_becomes_a_loop_edge() {
        // область 1 — остров внутри области 0
        let grid = grid_from_rows(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ]);
        let shapes = extract_shapes(&grid, &ids(2));

        // рамка — одна петля, контур острова — вторая
        assert_eq!(shapes.edges.len(), 2);
        assert!(shapes.edges.iter().all(|e| e.v1 == e.v2));

        // рамочная петля видит только область 0, контур острова — обе
        assert_eq!(shapes.provinces[0].edges, vec![0, 1]);
        assert_eq!(shapes.provinces[1].edges, vec![1]);
    }

    #[test]
    fn flanking_regions_are_constant_along_each_chain() {
        // четыре квадранта: крест из швов с развилкой в центре
        let grid = grid_from_rows(&[
            &[0, 0, 1, 1],
            &[0, 0, 1, 1],
            &[2, 2, 3, 3],
            &[2, 2, 3, 3],
        ]);
        let shapes = extract_shapes(&grid, &ids(4));

        for p in &shapes.provinces {
            assert!(!p.edges.is_empty());
            let mut sorted = p.edges.clone();
            sorted.dedup();
            assert_eq!(sorted, p.edges, "edge list must be deduplicated");
        }

        // центральный угол (2,2) — развилка степени 4
        assert!(shapes.vertices.iter().any(|v| (v.x, v.y) == (2, 2)));
    }
}
