// src/rivers.rs
//! Реки на планарном графе разбиения
//!
//! Модель стока строится на вершинах графа, а не на пикселях:
//! 1. Рёбра океанских провинций исключаются заранее — река обязана
//!    закончиться на берегу, последнее ребро в океан не рисуется.
//! 2. Высоты вершин снимаются со сглаженной карты высот; при расхождении
//!    размеров решётки и растра координаты вершин масштабируются.
//! 3. Истоки — сухопутные вершины не ниже 60-го перцентиля высот.
//! 4. Из каждой вершины ведёт не больше одного ребра — к соседу с
//!    максимальным перепадом вниз; перепады меньше 1e-4 игнорируются,
//!    чтобы не зациклиться на плоских участках.
//! 5. Поток накапливается обходом вершин по убыванию высоты: спуск всегда
//!    уменьшает высоту, поэтому такой порядок топологический и каждое
//!    слагаемое окончательно.

use std::collections::{HashMap, HashSet};

use crate::heightmap::Heightmap;
use crate::province::{ProvinceRecord, RegionKind};
use crate::shapes::ShapeData;

// Минимальный перепад высоты, который считается спуском
const MIN_DROP: f64 = 1e-4;
// Сглаживание карты высот перед съёмом градиентов
const BLUR_SIGMA: f32 = 3.0;
// Перцентиль высот суши, с которого начинаются истоки
const SOURCE_PERCENTILE: f64 = 60.0;

/// Результат генерации рек
#[derive(Debug, Clone, Default)]
pub struct RiverData {
    /// Идентификаторы рёбер, помеченных как реки
    pub river_edges: HashSet<usize>,
    /// Накопленный поток по рёбрам (диагностика)
    pub edge_flow: HashMap<usize, f64>,
}

/// Выбирает рёбра-реки по карте высот
#[must_use]
pub fn generate_rivers(
    shapes: &ShapeData,
    heightmap: &Heightmap,
    metadata: &[ProvinceRecord],
    threshold: f64,
) -> RiverData {
    if shapes.vertices.is_empty() || shapes.edges.is_empty() {
        return RiverData::default();
    }

    let (edge_bad, v_is_land) = classify(shapes, metadata);
    let heights = sample_vertex_heights(shapes, heightmap);
    accumulate_flow(shapes, &heights, &v_is_land, &edge_bad, threshold)
}

/// Помечает рёбра океанских провинций и сухопутные вершины
fn classify(shapes: &ShapeData, metadata: &[ProvinceRecord]) -> (Vec<bool>, Vec<bool>) {
    let mut edge_bad = vec![false; shapes.edges.len()];
    let mut v_is_land = vec![false; shapes.vertices.len()];

    for (i, prov) in shapes.provinces.iter().enumerate() {
        let kind = metadata.get(i).map_or(RegionKind::Land, |d| d.kind);
        for &eid in &prov.edges {
            if kind == RegionKind::Ocean {
                edge_bad[eid] = true;
            } else {
                let e = &shapes.edges[eid];
                v_is_land[e.v1] = true;
                v_is_land[e.v2] = true;
            }
        }
    }

    (edge_bad, v_is_land)
}

/// Снимает высоту каждой вершины со сглаженной карты
fn sample_vertex_heights(shapes: &ShapeData, heightmap: &Heightmap) -> Vec<f64> {
    let blurred = heightmap.blurred(BLUR_SIGMA);
    let hw = i64::from(blurred.width);
    let hh = i64::from(blurred.height);

    let max_vx = shapes.vertices.iter().map(|v| v.x).max().unwrap_or(0);
    let max_vy = shapes.vertices.iter().map(|v| v.y).max().unwrap_or(0);
    let scale_x = if max_vx > 0 {
        hw as f64 / f64::from(max_vx + 1)
    } else {
        1.0
    };
    let scale_y = if max_vy > 0 {
        hh as f64 / f64::from(max_vy + 1)
    } else {
        1.0
    };
    let need_scale = (scale_x - 1.0).abs() > 0.01 || (scale_y - 1.0).abs() > 0.01;
    if need_scale {
        println!("📐 Пересчёт координат вершин под карту высот: {scale_x:.2}×{scale_y:.2}");
    }

    shapes
        .vertices
        .iter()
        .map(|v| {
            let (mut vx, mut vy) = (f64::from(v.x), f64::from(v.y));
            if need_scale {
                vx *= scale_x;
                vy *= scale_y;
            }
            let xi = (vx as i64).clamp(0, hw - 1);
            let yi = (vy as i64).clamp(0, hh - 1);
            f64::from(blurred.data[(yi * hw + xi) as usize])
        })
        .collect()
}

/// Накопление потока и отбор рек по готовым высотам вершин
fn accumulate_flow(
    shapes: &ShapeData,
    heights: &[f64],
    v_is_land: &[bool],
    edge_bad: &[bool],
    threshold: f64,
) -> RiverData {
    let n = shapes.vertices.len();

    // порог истока: 60-й перцентиль высот сухопутных вершин
    let mut land_heights: Vec<f64> = (0..n).filter(|&v| v_is_land[v]).map(|v| heights[v]).collect();
    let source_threshold = if land_heights.is_empty() {
        println!("⚠️  Сухопутных вершин нет — истоки рек не назначены");
        0.0
    } else {
        percentile(&mut land_heights, SOURCE_PERCENTILE)
    };

    // смежность вершин в порядке рёбер
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for e in &shapes.edges {
        adjacency[e.v1].push((e.v2, e.id));
        adjacency[e.v2].push((e.v1, e.id));
    }

    // направление стока: самое крутое падение, первый сосед при равенстве
    let mut downstream: Vec<Option<(usize, usize)>> = vec![None; n];
    for v in 0..n {
        if !v_is_land[v] {
            continue;
        }
        let mut max_drop = 0.0;
        for &(u, eid) in &adjacency[v] {
            let drop = heights[v] - heights[u];
            if drop > MIN_DROP && drop > max_drop {
                max_drop = drop;
                downstream[v] = Some((u, eid));
            }
        }
    }

    let mut v_flow: Vec<f64> = (0..n)
        .map(|v| {
            if v_is_land[v] && heights[v] >= source_threshold {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    let sources = v_flow.iter().filter(|&&f| f > 0.0).count();
    println!("🏔  Истоков рек: {sources} вершин");

    // стабильная сортировка по убыванию высоты: при равных высотах
    // сохраняется порядок идентификаторов вершин
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| heights[b].partial_cmp(&heights[a]).unwrap_or(std::cmp::Ordering::Equal));

    let mut edge_flow: HashMap<usize, f64> = HashMap::new();
    let mut max_flow = 0.0f64;
    for &v in &order {
        if let Some((u, eid)) = downstream[v] {
            let flow = v_flow[v];
            if flow > 0.0 {
                v_flow[u] += flow;
                let acc = edge_flow.entry(eid).or_insert(0.0);
                *acc += flow;
                max_flow = max_flow.max(*acc);
            }
        }
    }
    println!("🌊 Максимальный накопленный поток: {max_flow}");

    let river_edges = edge_flow
        .iter()
        .filter(|&(&eid, &flow)| flow >= threshold && !edge_bad[eid])
        .map(|(&eid, _)| eid)
        .collect();

    RiverData {
        river_edges,
        edge_flow,
    }
}

/// Перцентиль с линейной интерполяцией между порядковыми статистиками
fn percentile(values: &mut [f64], p: f64) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n == 1 {
        return values[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;
    if lo + 1 < n {
        values[lo] + frac * (values[lo + 1] - values[lo])
    } else {
        values[lo]
    }
}
