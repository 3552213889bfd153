//! Derivation tables
//!
//! Each codec draws its key bytes from a fixed table of 64 words. The values
//! come from the game executable.

/// Number of words in each derivation table
pub const TABLE_LEN: usize = 64;

/// Table for course containers (AES and CMAC keys)
pub static LEVEL_TABLE: [u32; TABLE_LEN] = [
    0x7AB1_C9D2, 0xCA75_0936, 0x3003_E59C, 0xF261_014B,
    0x2E25_160A, 0xED61_4811, 0xF1AC_6240, 0xD592_72CD,
    0xF385_49BF, 0x6CF5_B327, 0xDA4D_B82A, 0x820C_435A,
    0xC956_09BA, 0x19BE_08B0, 0x738E_2B81, 0xED3C_349A,
    0x0452_75D1, 0xE0A7_3635, 0x1DEB_F4DA, 0x9924_B0DE,
    0x6A1F_C367, 0x7197_0467, 0xFC55_ABEB, 0x368D_7489,
    0x0CC9_7D1D, 0x17CC_441E, 0x3528_D152, 0xD012_9B53,
    0xE12A_69E9, 0x13D1_BDB7, 0x32EA_A9ED, 0x42F4_1D1B,
    0xAEA5_F51F, 0x42C5_D23C, 0x7CC7_42ED, 0x723B_A5F9,
    0xDE5B_99E3, 0x2C00_55A4, 0xC388_07B4, 0x4C09_9B61,
    0xC4E4_568E, 0x8C29_C901, 0xE13B_34AC, 0xE7C3_F212,
    0xB67E_F941, 0x0803_8965, 0x8AFD_1E6A, 0x8E53_41A3,
    0xA4C6_1107, 0xFBAF_1418, 0x9B05_EF64, 0x3C91_734E,
    0x82EC_6646, 0xFB19_F33E, 0x3BDE_6FE2, 0x17A8_4CCA,
    0xCCDF_0CE9, 0x50E4_135C, 0xFF26_58B2, 0x3780_F156,
    0x7D8F_5D68, 0x517C_BED1, 0x1FCD_DF0D, 0x77A5_8C94,
];

/// Table for thumbnail containers (HMAC key)
pub static THUMBNAIL_TABLE: [u32; TABLE_LEN] = [
    0x39B3_99D2, 0xFAE4_0B38, 0x851B_C213, 0x8CB4_E3D9,
    0x7ED1_C46A, 0xE805_0462, 0xD8D2_4F76, 0xB528_86FC,
    0x6789_0BF0, 0xF532_9CB0, 0xD597_FB28, 0x2B8E_E0EA,
    0x4757_4C51, 0x0F75_69D9, 0xCF11_63AE, 0xE4A1_53BF,
    0xD1FA_E468, 0xD4C6_4738, 0x3601_06F5, 0xDD7E_B113,
    0xC296_F3E2, 0x2C58_F258, 0x79B5_54E1, 0x85DF_9D06,
    0xAA30_7330, 0x0141_0F69, 0xB2F2_C573, 0x82B9_3EB1,
    0xF351_A11C, 0x6309_8693, 0x885B_5DA5, 0x8872_A8ED,
    0xACD9_CB13, 0xED7F_BCAD, 0xE6A4_1EC2, 0x5F44_E79F,
    0x8346_F5B5, 0x389F_E6ED, 0x5071_24B5, 0xE9B2_3EAA,
    0x5771_13F0, 0xA95E_D917, 0x2F62_D158, 0x4784_3F86,
    0xC656_37D0, 0x2F27_2052, 0xBA4A_4CC4, 0xB5F1_46F6,
    0x501B_87A7, 0x51FC_3A93, 0x6EDE_3F02, 0x3D26_5728,
    0x9B80_9440, 0x75B8_9229, 0xF6A2_80CC, 0x8537_FA68,
    0x5B5E_D19A, 0x6FC0_5BB6, 0xF4EF_5261, 0xAA1B_7D4F,
    0xFCB2_6110, 0x00AD_3D74, 0xC0E7_3A4B, 0xF132_E7C7,
];
