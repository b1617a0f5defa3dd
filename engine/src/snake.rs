use crate::collision::CollisionKind;
use crate::log_debug;
use crate::types::{Direction, Position};

/// Stable index of a segment inside a [`Snake`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentId(usize);

/// One occupied cell of the body.
///
/// `next` points one step toward the tail and is the owning link of the
/// chain. `prev` points toward the head and is only used to walk backwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub next: Option<SegmentId>,
    pub prev: Option<SegmentId>,
}

/// Segment chain stored in an append-only arena. Segments are never removed,
/// so indices stay valid for the snake's whole life.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Segment>,
    head: SegmentId,
    tail: SegmentId,
    direction: Direction,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Self {
            segments: vec![Segment {
                position: start,
                next: None,
                prev: None,
            }],
            head: SegmentId(0),
            tail: SegmentId(0),
            direction: Direction::Up,
        }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[self.head.0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail.0]
    }

    pub fn head_id(&self) -> SegmentId {
        self.head
    }

    pub fn tail_id(&self) -> SegmentId {
        self.tail
    }

    pub fn head_position(&self) -> Position {
        self.head().position
    }

    pub fn tail_position(&self) -> Position {
        self.tail().position
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    /// Direction of the most recent move, `Up` for a fresh snake.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walks the chain from head to tail.
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            snake: self,
            cursor: Some(self.head),
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().map(|segment| segment.position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions().any(|p| p == position)
    }

    /// Moves one cell. Every body segment takes its predecessor's old cell,
    /// walking tail to head, then the head steps in `direction`.
    ///
    /// Fails with [`CollisionKind::SelfCollision`] if the new head lands on a
    /// body segment. The positions stay moved in that case.
    pub fn step(&mut self, direction: Direction) -> Result<Position, CollisionKind> {
        let mut cursor = self.tail;
        while let Some(prev) = self.segments[cursor.0].prev {
            self.segments[cursor.0].position = self.segments[prev.0].position;
            cursor = prev;
        }

        self.direction = direction;
        let new_head = self.head_position().step(direction);
        self.segments[self.head.0].position = new_head;

        if self.iter().skip(1).any(|segment| segment.position == new_head) {
            return Err(CollisionKind::SelfCollision);
        }

        Ok(new_head)
    }

    /// Appends one segment behind the tail, opposite to the travel direction.
    pub fn eat(&mut self) {
        let position = self.tail_position().step(self.direction.opposite());
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment {
            position,
            next: None,
            prev: Some(self.tail),
        });
        self.segments[self.tail.0].next = Some(id);
        self.tail = id;
        log_debug!("snake grew to {} segments, new tail at ({}, {})", self.len(), position.x, position.y);
    }
}

pub struct Segments<'a> {
    snake: &'a Snake,
    cursor: Option<SegmentId>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.snake.segment(self.cursor?)?;
        self.cursor = segment.next;
        Some(segment)
    }
}
