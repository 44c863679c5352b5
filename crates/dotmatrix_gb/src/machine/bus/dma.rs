use super::GameBoyBus;

/// Bytes copied by one OAM DMA.
const OAM_DMA_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA: copy `XX00..XX9F` to `FE00..FE9F`.
    ///
    /// The transfer goes through ordinary bus reads and writes, so the
    /// source may be banked cartridge memory. It completes instantly; the
    /// 160-cycle bus lockout is not modelled.
    pub(crate) fn perform_dma(&mut self, source_high: u8) {
        let base = (source_high as u16) << 8;
        for i in 0..OAM_DMA_LEN {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.write8_mmio(0xFE00 + i, byte);
        }
    }
}
