//! Internal bus routing.

/// Combinational routing between the datapath's internal buses.
///
/// Source selects gate registers onto the data bus (DB), address low
/// (ADL), address high (ADH) and special bus (SB). An undriven bus
/// precharges to 0xFF, matching the NMOS behavior the rest of the
/// datapath depends on. When two sources contend, the input data latch
/// wins over the program counter.
#[derive(Debug, Default)]
pub struct Routing {
    /// Input data latch value.
    pub i_dl: u8,
    /// Program counter low byte.
    pub i_pcl: u8,
    /// Program counter high byte.
    pub i_pch: u8,
    /// Route DL onto DB.
    pub dl_db: bool,
    /// Route DL onto ADL.
    pub dl_adl: bool,
    /// Route DL onto ADH.
    pub dl_adh: bool,
    /// Route PCL onto ADL.
    pub pcl_adl: bool,
    /// Route PCL onto DB.
    pub pcl_db: bool,
    /// Route PCH onto ADH.
    pub pch_adh: bool,
}

impl Routing {
    const PRECHARGE: u8 = 0xFF;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deassert every source select.
    pub fn clear(&mut self) {
        self.dl_db = false;
        self.dl_adl = false;
        self.dl_adh = false;
        self.pcl_adl = false;
        self.pcl_db = false;
        self.pch_adh = false;
    }

    /// Internal data bus.
    #[must_use]
    pub const fn db(&self) -> u8 {
        if self.dl_db {
            self.i_dl
        } else if self.pcl_db {
            self.i_pcl
        } else {
            Self::PRECHARGE
        }
    }

    /// Address low bus.
    #[must_use]
    pub const fn adl(&self) -> u8 {
        if self.dl_adl {
            self.i_dl
        } else if self.pcl_adl {
            self.i_pcl
        } else {
            Self::PRECHARGE
        }
    }

    /// Address high bus.
    #[must_use]
    pub const fn adh(&self) -> u8 {
        if self.dl_adh {
            self.i_dl
        } else if self.pch_adh {
            self.i_pch
        } else {
            Self::PRECHARGE
        }
    }

    /// Special bus; nothing modeled here drives it.
    #[must_use]
    pub const fn sb(&self) -> u8 {
        Self::PRECHARGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undriven_buses_precharge_high() {
        let routing = Routing::new();
        assert_eq!(routing.db(), 0xFF);
        assert_eq!(routing.adl(), 0xFF);
        assert_eq!(routing.adh(), 0xFF);
        assert_eq!(routing.sb(), 0xFF);
    }

    #[test]
    fn routes_dl() {
        let mut routing = Routing::new();
        routing.i_dl = 0x3C;
        routing.dl_db = true;
        routing.dl_adl = true;
        routing.dl_adh = true;
        assert_eq!(routing.db(), 0x3C);
        assert_eq!(routing.adl(), 0x3C);
        assert_eq!(routing.adh(), 0x3C);
    }

    #[test]
    fn routes_program_counter() {
        let mut routing = Routing::new();
        routing.i_pcl = 0x34;
        routing.i_pch = 0x12;
        routing.pcl_adl = true;
        routing.pcl_db = true;
        routing.pch_adh = true;
        assert_eq!(routing.adl(), 0x34);
        assert_eq!(routing.db(), 0x34);
        assert_eq!(routing.adh(), 0x12);
    }

    #[test]
    fn data_latch_wins_contention() {
        let mut routing = Routing::new();
        routing.i_dl = 0xAA;
        routing.i_pcl = 0x55;
        routing.dl_adl = true;
        routing.pcl_adl = true;
        assert_eq!(routing.adl(), 0xAA);
    }

    #[test]
    fn clear_releases_every_bus() {
        let mut routing = Routing::new();
        routing.i_dl = 0x3C;
        routing.dl_db = true;
        routing.clear();
        assert_eq!(routing.db(), 0xFF);
    }
}
