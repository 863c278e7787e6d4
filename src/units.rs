#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Axis(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct AxesCount(pub usize);
