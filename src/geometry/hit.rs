/// Crossing-number point-in-polygon test
///
/// Casts a ray from `point` towards +x and counts edge crossings; an odd
/// count means inside. The polygon may be open or closed. Points exactly on
/// an edge may land on either side.
pub fn point_in_polygon(point: [f64; 2], polygon: &[[f64; 2]]) -> bool {
    let [x, y] = point;
    let mut inside = false;

    if polygon.is_empty() {
        return false;
    }

    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];

        let crosses = (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}
