#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Top,
    Middle,
    Bottom,
}

/// One slice of the background stack. `index` counts middle repeats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub index: u32,
    pub y: f32,
    pub height: f32,
}

/// Top art, `middle_count` repeats of the middle art, bottom art.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStack {
    pub top: f32,
    pub middle: f32,
    pub bottom: f32,
    pub middle_count: u32,
}

impl BackgroundStack {
    pub fn new(top: f32, middle: f32, bottom: f32, middle_count: u32) -> Self {
        Self {
            top,
            middle,
            bottom,
            middle_count,
        }
    }

    pub fn total_height(&self) -> f32 {
        self.top + self.middle * self.middle_count as f32 + self.bottom
    }

    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.middle_count as usize + 2);
        segments.push(Segment {
            kind: SegmentKind::Top,
            index: 0,
            y: 0.0,
            height: self.top,
        });
        for index in 0..self.middle_count {
            segments.push(Segment {
                kind: SegmentKind::Middle,
                index,
                y: self.top + self.middle * index as f32,
                height: self.middle,
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Bottom,
            index: 0,
            y: self.top + self.middle * self.middle_count as f32,
            height: self.bottom,
        });
        segments
    }
}
